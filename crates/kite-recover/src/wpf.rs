use std::path::Path;

use kite_core::{safe_name, KiteError, NodeId, PropValue, Properties, UiTree, UiTreeBuilder};
use kite_parser::{parse_xml_document, XmlElementNode};

use crate::source::{find_files, read_source};
use crate::ParseReport;

/// Markup files starting with this prefix (any case) describe application
/// resources rather than a window.
pub const APP_DESCRIPTOR_PREFIX: &str = "app.";

/// Name attributes, in lookup order. Neither becomes a property.
const NAME_ATTRIBUTES: [&str; 2] = ["x:Name", "Name"];

pub fn parse_wpf_project(root: &Path) -> ParseReport {
    let mut report = ParseReport::default();

    for path in find_files(root, &["*.xaml"]) {
        let is_app_descriptor = path
            .file_name()
            .map(|name| {
                name.to_string_lossy()
                    .to_lowercase()
                    .starts_with(APP_DESCRIPTOR_PREFIX)
            })
            .unwrap_or(false);
        if is_app_descriptor {
            tracing::debug!(path = %path.display(), "application descriptor ignored");
            continue;
        }

        let outcome = parse_xaml_file(&path).map(Some);
        report.record(path, outcome);
    }

    report
}

pub fn parse_xaml_file(path: &Path) -> Result<UiTree, KiteError> {
    let text = read_source(path)?;
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_xaml_source(&stem, &text).map_err(|error| KiteError {
        path: Some(path.to_path_buf()),
        ..error
    })
}

/// The root element becomes the window; it is named after the file, never
/// after an in-markup name.
pub fn parse_xaml_source(window_name: &str, text: &str) -> Result<UiTree, KiteError> {
    let document = parse_xml_document(text)?;
    let root = &document.root;

    let mut builder = UiTreeBuilder::new(root.name.clone(), safe_name(window_name));
    for (name, value) in element_properties(root) {
        builder.set_property(NodeId::ROOT, name, value);
    }
    walk_children(&mut builder, root, NodeId::ROOT);

    Ok(builder.finish())
}

fn walk_children(builder: &mut UiTreeBuilder, element: &XmlElementNode, parent: NodeId) {
    for child in &element.children {
        let name = NAME_ATTRIBUTES
            .iter()
            .find_map(|attribute| child.attr(attribute))
            .unwrap_or(&child.name);
        tracing::trace!(kind = %child.name, line = child.line, "markup element");
        let id = builder.add_child(
            parent,
            child.name.clone(),
            safe_name(name),
            element_properties(child),
        );
        walk_children(builder, child, id);
    }
}

fn element_properties(element: &XmlElementNode) -> Properties {
    element
        .attributes
        .iter()
        .filter(|attribute| !NAME_ATTRIBUTES.contains(&attribute.qualified_name().as_str()))
        .map(|attribute| (attribute.name.clone(), PropValue::str(&attribute.value)))
        .collect()
}
