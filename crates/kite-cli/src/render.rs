//! JSON views printed by `kite inspect`.

use serde::Serialize;

use kite_api::{FileDiagnostic, ProjectKind};
use kite_core::taxonomy::{winforms_target, wpf_target, WidgetTarget};
use kite_core::{KiteError, NodeId, Properties, UiTree};

use crate::map_cli_output_json;

#[derive(Debug, Serialize)]
pub(crate) struct NodeView<'a> {
    kind: &'a str,
    name: &'a str,
    /// `null` when the kind has no entry in the taxonomy for this project kind.
    target: Option<WidgetTarget>,
    properties: &'a Properties,
    children: Vec<NodeView<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiagnosticView {
    path: String,
    code: String,
    message: String,
}

pub(crate) fn node_view(tree: &UiTree, id: NodeId, kind: ProjectKind) -> NodeView<'_> {
    let node = tree.node(id);
    let target = match kind {
        ProjectKind::WinForms => winforms_target(&node.kind),
        ProjectKind::Wpf => wpf_target(&node.kind),
    };
    NodeView {
        kind: &node.kind,
        name: &node.name,
        target,
        properties: &node.properties,
        children: node
            .children
            .iter()
            .map(|child| node_view(tree, *child, kind))
            .collect(),
    }
}

pub(crate) fn windows_json(windows: &[UiTree], kind: ProjectKind) -> Result<String, KiteError> {
    let views: Vec<NodeView<'_>> = windows
        .iter()
        .map(|window| node_view(window, window.root_id(), kind))
        .collect();
    serde_json::to_string(&views).map_err(map_cli_output_json)
}

pub(crate) fn diagnostics_json(diagnostics: &[FileDiagnostic]) -> Result<String, KiteError> {
    let views: Vec<DiagnosticView> = diagnostics
        .iter()
        .map(|diagnostic| DiagnosticView {
            path: diagnostic.path.display().to_string(),
            code: diagnostic.error.code.clone(),
            message: diagnostic.error.message.clone(),
        })
        .collect();
    serde_json::to_string(&views).map_err(map_cli_output_json)
}
