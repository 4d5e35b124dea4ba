//! WinForms window recovery.
//!
//! Designer files (`*.Designer.cs`) are the primary source. Hand-written
//! code-behind is scanned only when the designer files yield no window, or
//! only windows in which no containment statement placed a control.

use std::collections::HashMap;
use std::path::Path;

use kite_core::taxonomy::{is_code_kind_recognized, is_window_property};
use kite_core::{safe_name, KiteError, NodeId, PropValue, Properties, UiTree, UiTreeBuilder};
use kite_parser::{
    find_window_class, normalize_literal, scan_statements, CodeEvent, Owner, ScanMode,
};

use crate::source::{find_files, read_source};
use crate::ParseReport;

pub const DESIGNER_SUFFIX: &str = ".Designer.cs";

const WINDOW_KIND: &str = "Form";
/// Kind given to names that are referenced but never instantiated.
const PLACEHOLDER_KIND: &str = "Control";
const COMPONENTS_FIELD: &str = "components";
const WRAPPER_KINDS: [&str; 2] = ["Container", "IContainer"];

pub fn parse_winforms_project(root: &Path) -> ParseReport {
    let mut report = ParseReport::default();
    let mut structured = false;

    for path in find_files(root, &["*.Designer.cs"]) {
        let outcome = read_source(&path).map(|text| {
            let window = assemble_designer(&designer_window_name(&path), &text);
            structured |= window.placed_controls;
            Some(window.tree)
        });
        report.record(path, outcome);
    }

    if structured {
        return report;
    }

    tracing::debug!(
        windows = report.roots.len(),
        "designer metadata missing or empty, scanning code-behind"
    );
    for path in find_files(root, &["*.cs"]) {
        if path.to_string_lossy().ends_with(DESIGNER_SUFFIX) {
            continue;
        }
        let outcome = parse_code_file(&path);
        report.record(path, outcome);
    }

    report
}

pub fn parse_designer_source(window_name: &str, text: &str) -> UiTree {
    assemble_designer(window_name, text).tree
}

fn assemble_designer(window_name: &str, text: &str) -> AssembledWindow {
    let events = scan_statements(text, ScanMode::Designer);
    WindowAssembly::new(window_name, Pass::Designer).apply(events)
}

fn designer_window_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().replace(DESIGNER_SUFFIX, ""))
        .unwrap_or_default()
}

/// `Ok(None)` when the file declares no window class.
pub fn parse_code_file(path: &Path) -> Result<Option<UiTree>, KiteError> {
    let text = read_source(path)?;
    Ok(parse_code_source(&text))
}

pub fn parse_code_source(text: &str) -> Option<UiTree> {
    let window_name = find_window_class(text)?;
    let events = scan_statements(text, ScanMode::CodeBehind);
    Some(
        WindowAssembly::new(&window_name, Pass::CodeBehind)
            .apply(events)
            .tree,
    )
}

struct AssembledWindow {
    tree: UiTree,
    /// At least one containment statement reached a known control.
    placed_controls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Unknown names become placeholder controls.
    Designer,
    /// Only allow-listed kinds are registered; unknown names are ignored.
    CodeBehind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeclaredParent {
    Window,
    Control(String),
}

#[derive(Debug)]
struct ControlDraft {
    name: String,
    kind: String,
    properties: Properties,
    parent: Option<DeclaredParent>,
}

impl ControlDraft {
    fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            properties: Properties::new(),
            parent: None,
        }
    }
}

/// Controls of one window in first-seen order.
#[derive(Debug, Default)]
struct ControlRegistry {
    drafts: Vec<ControlDraft>,
    index: HashMap<String, usize>,
}

impl ControlRegistry {
    fn get_mut(&mut self, name: &str) -> Option<&mut ControlDraft> {
        let position = *self.index.get(name)?;
        Some(&mut self.drafts[position])
    }

    /// A repeated registration replaces the draft but keeps its position.
    fn replace(&mut self, name: &str, kind: &str) {
        match self.index.get(name) {
            Some(position) => self.drafts[*position] = ControlDraft::new(name, kind),
            None => {
                self.push(ControlDraft::new(name, kind));
            }
        }
    }

    fn get_or_insert(&mut self, name: &str, kind: &str) -> &mut ControlDraft {
        let position = match self.index.get(name) {
            Some(position) => *position,
            None => self.push(ControlDraft::new(name, kind)),
        };
        &mut self.drafts[position]
    }

    fn push(&mut self, draft: ControlDraft) -> usize {
        let position = self.drafts.len();
        self.index.insert(draft.name.clone(), position);
        self.drafts.push(draft);
        position
    }
}

struct WindowAssembly {
    window_name: String,
    pass: Pass,
    builder: UiTreeBuilder,
    controls: ControlRegistry,
    placed_controls: bool,
}

impl WindowAssembly {
    fn new(window_name: &str, pass: Pass) -> Self {
        Self {
            window_name: window_name.to_string(),
            pass,
            builder: UiTreeBuilder::new(WINDOW_KIND, safe_name(window_name)),
            controls: ControlRegistry::default(),
            placed_controls: false,
        }
    }

    fn apply(mut self, events: Vec<CodeEvent>) -> AssembledWindow {
        for event in events {
            match event {
                CodeEvent::Instantiate {
                    name,
                    kind,
                    initializer,
                } => self.instantiate(&name, &kind, initializer),
                CodeEvent::Assign {
                    owner,
                    property,
                    value,
                } => self.assign(owner, &property, &value),
                CodeEvent::AddChildren {
                    parent, children, ..
                } => {
                    let parent = match parent {
                        Owner::Window => DeclaredParent::Window,
                        Owner::Named(name) => DeclaredParent::Control(name),
                    };
                    for child in children {
                        self.declare_parent(&child, parent.clone());
                    }
                }
                CodeEvent::WindowTitle(text) => {
                    self.builder
                        .set_property(NodeId::ROOT, "Text", PropValue::Str(text));
                }
                CodeEvent::WindowClientSize { w, h } => {
                    self.builder
                        .set_property(NodeId::ROOT, "ClientSize", PropValue::Size { w, h });
                }
            }
        }
        self.materialize()
    }

    fn instantiate(&mut self, name: &str, kind: &str, initializer: Vec<(String, String)>) {
        if name == COMPONENTS_FIELD {
            return;
        }
        match self.pass {
            Pass::Designer => {
                if WRAPPER_KINDS.contains(&kind) {
                    return;
                }
                self.controls.replace(name, kind);
            }
            Pass::CodeBehind => {
                if !is_code_kind_recognized(kind) {
                    tracing::trace!(name, kind, "unsupported kind dropped");
                    return;
                }
                let draft = self.controls.get_or_insert(name, kind);
                for (property, value) in initializer {
                    let normalized = normalize_literal(&property, &value);
                    draft.properties.insert(property, normalized);
                }
            }
        }
    }

    fn assign(&mut self, owner: Owner, property: &str, value: &str) {
        let target = match owner {
            Owner::Window => None,
            Owner::Named(name) if name == self.window_name => None,
            Owner::Named(name) => Some(name),
        };

        let Some(name) = target else {
            if is_window_property(property) {
                self.builder.set_property(
                    NodeId::ROOT,
                    property,
                    normalize_literal(property, value),
                );
            }
            return;
        };

        if let Some(draft) = self.control_for_reference(&name) {
            draft
                .properties
                .insert(property.to_string(), normalize_literal(property, value));
        }
    }

    /// Last write wins: every edge overwrites whatever parent was declared
    /// before it.
    fn declare_parent(&mut self, child: &str, parent: DeclaredParent) {
        if let Some(draft) = self.control_for_reference(child) {
            draft.parent = Some(parent);
            self.placed_controls = true;
        }
    }

    fn control_for_reference(&mut self, name: &str) -> Option<&mut ControlDraft> {
        match self.pass {
            Pass::Designer => Some(self.controls.get_or_insert(name, PLACEHOLDER_KIND)),
            Pass::CodeBehind => self.controls.get_mut(name),
        }
    }

    fn materialize(mut self) -> AssembledWindow {
        let drafts = std::mem::take(&mut self.controls.drafts);
        let index = std::mem::take(&mut self.controls.index);

        let mut ids = Vec::with_capacity(drafts.len());
        let mut parents = Vec::with_capacity(drafts.len());
        for draft in drafts {
            ids.push(self.builder.add_detached(
                draft.kind,
                safe_name(&draft.name),
                draft.properties,
            ));
            parents.push(draft.parent);
        }

        for (id, parent) in ids.iter().zip(parents) {
            let target = match parent {
                Some(DeclaredParent::Control(name)) => index
                    .get(&name)
                    .map(|position| ids[*position])
                    .unwrap_or(NodeId::ROOT),
                Some(DeclaredParent::Window) | None => NodeId::ROOT,
            };
            if !self.builder.attach(*id, target) {
                tracing::debug!(
                    window = %self.window_name,
                    control = %self.builder.node(*id).name,
                    "containment cycle, control placed under the window"
                );
                self.builder.attach(*id, NodeId::ROOT);
            }
        }

        AssembledWindow {
            tree: self.builder.finish(),
            placed_controls: self.placed_controls,
        }
    }
}
