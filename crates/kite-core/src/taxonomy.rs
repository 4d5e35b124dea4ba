//! Static widget tables shared by the parsers and by generators.
//!
//! The WinForms table doubles as the core of the allow-list used by the
//! code-behind scan: a kind without a target here (and outside
//! [`EXTRA_CODE_KINDS`]) is never materialized by that scan.

use serde::Serialize;

/// Target toolkit module and widget class for one source widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetTarget {
    pub module: &'static str,
    pub class: &'static str,
}

const fn target(module: &'static str, class: &'static str) -> WidgetTarget {
    WidgetTarget { module, class }
}

pub const WINFORMS_TARGETS: &[(&str, WidgetTarget)] = &[
    ("Form", target("tk", "Tk")),
    ("Button", target("ttk", "Button")),
    ("Label", target("ttk", "Label")),
    ("TextBox", target("ttk", "Entry")),
    ("MaskedTextBox", target("ttk", "Entry")),
    ("RichTextBox", target("tk", "Text")),
    ("ListBox", target("tk", "Listbox")),
    ("ListView", target("ttk", "Treeview")),
    ("TreeView", target("ttk", "Treeview")),
    ("ComboBox", target("ttk", "Combobox")),
    ("CheckBox", target("ttk", "Checkbutton")),
    ("RadioButton", target("ttk", "Radiobutton")),
    ("GroupBox", target("ttk", "Labelframe")),
    ("Panel", target("tk", "Frame")),
    ("FlowLayoutPanel", target("ttk", "Frame")),
    ("TableLayoutPanel", target("ttk", "Frame")),
    ("SplitContainer", target("ttk", "Frame")),
    ("TabControl", target("ttk", "Notebook")),
    ("TabPage", target("ttk", "Frame")),
    ("PictureBox", target("tk", "Label")),
    ("ProgressBar", target("ttk", "Progressbar")),
    ("TrackBar", target("ttk", "Scale")),
    ("NumericUpDown", target("widgets", "NumericUpDown")),
    ("DateTimePicker", target("widgets", "DatePicker")),
    ("MenuStrip", target("widgets", "MenuBar")),
    ("StatusStrip", target("widgets", "StatusBar")),
    ("ToolStrip", target("widgets", "ToolBar")),
    ("DataGridView", target("widgets", "DataGrid")),
    ("LinkLabel", target("widgets", "HyperlinkLabel")),
];

pub const WPF_TARGETS: &[(&str, WidgetTarget)] = &[
    ("Window", target("tk", "Toplevel")),
    ("Grid", target("tk", "Frame")),
    ("StackPanel", target("tk", "Frame")),
    ("DockPanel", target("tk", "Frame")),
    ("Button", target("ttk", "Button")),
    ("TextBlock", target("ttk", "Label")),
    ("TextBox", target("ttk", "Entry")),
    ("ListBox", target("tk", "Listbox")),
    ("ComboBox", target("ttk", "Combobox")),
    ("CheckBox", target("ttk", "Checkbutton")),
    ("RadioButton", target("ttk", "Radiobutton")),
];

/// Source property name to target option name.
pub const PROPERTY_RENAMES: &[(&str, &str)] = &[
    ("Text", "text"),
    ("Enabled", "state"),
    ("Visible", "visible"),
    ("BackColor", "background"),
    ("ForeColor", "foreground"),
];

/// Kinds the code-behind scan accepts on top of [`WINFORMS_TARGETS`].
pub const EXTRA_CODE_KINDS: &[&str] = &[
    "Control",
    "CheckedListBox",
    "HScrollBar",
    "VScrollBar",
    "CircleButton",
    "RoundedContextMenu",
];

/// Window-level properties absorbed into the window root; any other
/// assignment on the window itself is discarded.
pub const WINDOW_PROPERTIES: &[&str] = &[
    "Text",
    "ClientSize",
    "Size",
    "Width",
    "Height",
    "BackColor",
    "ForeColor",
];

pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Red", "#FF0000"),
    ("Green", "#00FF00"),
    ("Blue", "#0000FF"),
    ("Yellow", "#FFFF00"),
    ("Gray", "#808080"),
    ("LightGray", "#D3D3D3"),
    ("DarkGray", "#A9A9A9"),
    ("Transparent", "#FFFFFF"),
    ("Window", "#FFFFFF"),
];

pub const FALLBACK_COLOR: &str = "#000000";

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

pub fn winforms_target(kind: &str) -> Option<WidgetTarget> {
    lookup(WINFORMS_TARGETS, kind)
}

pub fn wpf_target(kind: &str) -> Option<WidgetTarget> {
    lookup(WPF_TARGETS, kind)
}

pub fn rename_property(property: &str) -> Option<&'static str> {
    lookup(PROPERTY_RENAMES, property)
}

pub fn is_code_kind_recognized(kind: &str) -> bool {
    winforms_target(kind).is_some() || EXTRA_CODE_KINDS.contains(&kind)
}

pub fn is_window_property(property: &str) -> bool {
    WINDOW_PROPERTIES.contains(&property)
}

/// Resolves a color name or hex literal for emission. Unknown names map to
/// [`FALLBACK_COLOR`].
pub fn color_to_hex(name_or_hex: &str) -> &str {
    let value = name_or_hex.trim();
    if value.starts_with('#') && (value.len() == 4 || value.len() == 7) {
        return value;
    }
    lookup(NAMED_COLORS, value).unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winforms_and_wpf_tables_resolve_targets() {
        assert_eq!(winforms_target("Form"), Some(target("tk", "Tk")));
        assert_eq!(
            winforms_target("DateTimePicker"),
            Some(target("widgets", "DatePicker"))
        );
        assert_eq!(winforms_target("Window"), None);
        assert_eq!(wpf_target("TextBlock"), Some(target("ttk", "Label")));
        assert_eq!(wpf_target("Form"), None);
    }

    #[test]
    fn allow_list_covers_table_and_extra_kinds() {
        assert!(is_code_kind_recognized("Button"));
        assert!(is_code_kind_recognized("CircleButton"));
        assert!(is_code_kind_recognized("Control"));
        assert!(!is_code_kind_recognized("Timer"));
        assert!(!is_code_kind_recognized("button"));
    }

    #[test]
    fn property_renames_and_window_properties() {
        assert_eq!(rename_property("BackColor"), Some("background"));
        assert_eq!(rename_property("Location"), None);
        assert!(is_window_property("ClientSize"));
        assert!(!is_window_property("AutoScaleMode"));
    }

    #[test]
    fn color_to_hex_passes_hex_and_resolves_names() {
        assert_eq!(color_to_hex("#abc"), "#abc");
        assert_eq!(color_to_hex(" #FF0080 "), "#FF0080");
        assert_eq!(color_to_hex("LightGray"), "#D3D3D3");
        assert_eq!(color_to_hex("Chartreuse"), FALLBACK_COLOR);
        assert_eq!(color_to_hex(""), FALLBACK_COLOR);
    }
}
