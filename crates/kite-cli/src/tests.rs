use super::*;
use crate::render::node_view;
use kite_core::{NodeId, PropValue, UiTreeBuilder};

use std::fs;
use std::path::Path;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

const DESIGNER: &str = r#"
    this.okButton = new System.Windows.Forms.Button();
    this.okButton.Location = new System.Drawing.Point(5, 6);
    this.spinner = new Vendor.Controls.Spinner();
    this.Controls.Add(this.okButton);
    this.Controls.Add(this.spinner);
    this.Text = "Main";
"#;

#[test]
fn resolve_input_rejects_missing_paths() {
    let root = tempfile::tempdir().expect("tempdir");
    let missing = root.path().join("nope");
    let error = resolve_input(missing.to_string_lossy().as_ref()).expect_err("missing input");
    assert_eq!(error.code, "CLI_INPUT_NOT_FOUND");
    assert_eq!(error.path.as_deref(), Some(missing.as_path()));

    let found = resolve_input(root.path().to_string_lossy().as_ref()).expect("existing input");
    assert_eq!(found, root.path());
}

#[test]
fn node_view_annotates_taxonomy_targets() {
    let mut builder = UiTreeBuilder::new("Form", "Main");
    builder.set_property(NodeId::ROOT, "Text", PropValue::str("Main"));
    let button = builder.add_child(NodeId::ROOT, "Button", "ok", Default::default());
    builder.set_property(button, "Location", PropValue::Point { x: 1, y: 2 });
    builder.add_child(NodeId::ROOT, "Spinner", "spin", Default::default());
    let tree = builder.finish();

    let view = serde_json::to_value(node_view(&tree, tree.root_id(), ProjectKind::WinForms))
        .expect("view json");
    assert_eq!(view["target"]["module"], "tk");
    assert_eq!(view["target"]["class"], "Tk");
    assert_eq!(view["properties"]["Text"], "Main");
    assert_eq!(view["children"][0]["target"]["class"], "Button");
    assert_eq!(view["children"][0]["properties"]["Location"]["x"], 1);
    assert!(view["children"][1]["target"].is_null());

    let as_wpf = serde_json::to_value(node_view(&tree, tree.root_id(), ProjectKind::Wpf))
        .expect("view json");
    assert!(as_wpf["target"].is_null());
}

#[test]
fn diagnostics_json_flattens_errors() {
    let diagnostics = vec![kite_api::FileDiagnostic {
        path: PathBuf::from("Broken.xaml"),
        error: KiteError::new("XML_PARSE_ERROR", "unexpected end"),
    }];
    let json = diagnostics_json(&diagnostics).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["path"], "Broken.xaml");
    assert_eq!(value[0]["code"], "XML_PARSE_ERROR");
    assert_eq!(value[0]["message"], "unexpected end");
}

#[test]
fn run_cli_from_args_reports_success_and_failures() {
    let root = tempfile::tempdir().expect("tempdir");
    write_file(&root.path().join("Main.Designer.cs"), DESIGNER);
    let input = root.path().to_string_lossy().to_string();
    let input = input.as_str();

    assert_eq!(run_cli_from_args(["kite", "inspect", "--input", input]), 0);
    assert_eq!(
        run_cli_from_args(["kite", "inspect", "--input", input, "--kind", "wpf"]),
        1,
        "a winforms project read as wpf has no windows"
    );
    assert_eq!(
        run_cli_from_args(["kite", "inspect", "--input", input, "--kind", "qt"]),
        1
    );
    assert_eq!(run_cli_from_args(["kite", "detect", "--input", input]), 0);
    assert_eq!(run_cli_from_args(["kite", "bogus"]), 2);
}

#[test]
fn invalid_kind_maps_to_cli_code() {
    let error = run(Cli {
        command: Mode::Inspect(InspectArgs {
            input: ".".to_string(),
            kind: Some("qt".to_string()),
            diagnostics: false,
        }),
    })
    .expect_err("invalid kind");
    assert_eq!(error.code, "CLI_KIND_INVALID");
}

#[test]
fn inspect_on_empty_project_propagates_project_empty() {
    let root = tempfile::tempdir().expect("tempdir");
    write_file(&root.path().join("notes.txt"), "no windows");
    let error = run(Cli {
        command: Mode::Inspect(InspectArgs {
            input: root.path().to_string_lossy().to_string(),
            kind: None,
            diagnostics: true,
        }),
    })
    .expect_err("empty project");
    assert_eq!(error.code, "PROJECT_EMPTY");
}
