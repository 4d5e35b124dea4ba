//! Statement scanner for WinForms C# sources.
//!
//! The scanner turns source text into a flat stream of [`CodeEvent`]s. It does
//! not parse C#: it recognizes the handful of statement shapes the WinForms
//! designer emits (and that hand-written code-behind tends to copy). Events are
//! returned grouped in the order consumers must apply them:
//!
//! 1. instantiations
//! 2. property assignments
//! 3. containment edges, by [`EdgeShape`] (`WindowSingle`, `WindowBatch`,
//!    `ContainerSingle`, `ContainerBatch`), each shape in source order
//! 4. window literals (designer mode only)
//!
//! Within step 3 a later edge for the same child replaces an earlier one.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// `*.Designer.cs`: only `x = new Kind();` counts as an instantiation.
    Designer,
    /// Hand-written code: instantiations may carry arguments and an
    /// object-initializer block.
    CodeBehind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// `this` or `base`.
    Window,
    Named(String),
}

impl Owner {
    fn from_ident(ident: &str) -> Self {
        match ident {
            "this" | "base" => Self::Window,
            other => Self::Named(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeShape {
    /// `this.Controls.Add(x);`
    WindowSingle,
    /// `this.Controls.AddRange(new Control[] { a, b });`
    WindowBatch,
    /// `owner.Controls.Add(x);` where `owner` is a control.
    ContainerSingle,
    /// `owner.Controls.AddRange(new Control[] { a, b });`
    ContainerBatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEvent {
    Instantiate {
        name: String,
        /// Last dotted segment of the constructed type.
        kind: String,
        initializer: Vec<(String, String)>,
    },
    Assign {
        owner: Owner,
        property: String,
        value: String,
    },
    AddChildren {
        parent: Owner,
        children: Vec<String>,
        shape: EdgeShape,
    },
    WindowTitle(String),
    WindowClientSize {
        w: i64,
        h: i64,
    },
}

pub fn scan_statements(source: &str, mode: ScanMode) -> Vec<CodeEvent> {
    let text = strip_comments(source);
    let mut events = Vec::new();

    match mode {
        ScanMode::Designer => scan_bare_instantiations(&text, &mut events),
        ScanMode::CodeBehind => scan_initializer_instantiations(&text, &mut events),
    }
    scan_assignments(&text, &mut events);
    scan_edges(&text, &mut events);
    if mode == ScanMode::Designer {
        scan_window_literals(&text, &mut events);
    }

    events
}

/// Name of the first `partial class Name : Form` declared in `source`.
pub fn find_window_class(source: &str) -> Option<String> {
    window_class_regex()
        .captures(&strip_comments(source))
        .map(|caps| caps["name"].to_string())
}

fn scan_bare_instantiations(text: &str, events: &mut Vec<CodeEvent>) {
    for caps in bare_instantiation_regex().captures_iter(text) {
        events.push(CodeEvent::Instantiate {
            name: caps["name"].to_string(),
            kind: last_segment(&caps["kind"]).to_string(),
            initializer: Vec::new(),
        });
    }
}

fn scan_initializer_instantiations(text: &str, events: &mut Vec<CodeEvent>) {
    for caps in initializer_instantiation_regex().captures_iter(text) {
        events.push(CodeEvent::Instantiate {
            name: caps["name"].to_string(),
            kind: last_segment(&caps["kind"]).to_string(),
            initializer: caps
                .name("init")
                .map(|init| split_initializer(init.as_str()))
                .unwrap_or_default(),
        });
    }
}

fn scan_assignments(text: &str, events: &mut Vec<CodeEvent>) {
    for caps in assignment_regex().captures_iter(text) {
        events.push(CodeEvent::Assign {
            owner: Owner::from_ident(&caps["owner"]),
            property: caps["prop"].to_string(),
            value: caps["value"].trim().to_string(),
        });
    }
}

fn scan_edges(text: &str, events: &mut Vec<CodeEvent>) {
    for caps in window_add_regex().captures_iter(text) {
        events.push(CodeEvent::AddChildren {
            parent: Owner::Window,
            children: vec![caps["child"].to_string()],
            shape: EdgeShape::WindowSingle,
        });
    }
    for caps in window_add_range_regex().captures_iter(text) {
        events.push(CodeEvent::AddChildren {
            parent: Owner::Window,
            children: split_child_list(&caps["list"]),
            shape: EdgeShape::WindowBatch,
        });
    }
    for caps in container_add_regex().captures_iter(text) {
        if let Owner::Named(parent) = Owner::from_ident(&caps["parent"]) {
            events.push(CodeEvent::AddChildren {
                parent: Owner::Named(parent),
                children: vec![caps["child"].to_string()],
                shape: EdgeShape::ContainerSingle,
            });
        }
    }
    for caps in container_add_range_regex().captures_iter(text) {
        if let Owner::Named(parent) = Owner::from_ident(&caps["parent"]) {
            events.push(CodeEvent::AddChildren {
                parent: Owner::Named(parent),
                children: split_child_list(&caps["list"]),
                shape: EdgeShape::ContainerBatch,
            });
        }
    }
}

fn scan_window_literals(text: &str, events: &mut Vec<CodeEvent>) {
    if let Some(caps) = window_title_regex().captures(text) {
        events.push(CodeEvent::WindowTitle(caps["text"].to_string()));
    }
    if let Some((w, h)) = client_size_regex().captures(text).and_then(|caps| {
        Some((
            caps["w"].parse::<i64>().ok()?,
            caps["h"].parse::<i64>().ok()?,
        ))
    }) {
        events.push(CodeEvent::WindowClientSize { w, h });
    }
}

fn split_child_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|token| token.trim().replace("this.", "").trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn last_segment(kind: &str) -> &str {
    kind.rsplit('.').next().unwrap_or(kind)
}

/// Splits an object-initializer body (`A = 1, B = f(2, 3)`) into
/// `(property, value)` pairs. Commas nested in brackets or string literals do
/// not split; segments without `=` are dropped.
pub fn split_initializer(body: &str) -> Vec<(String, String)> {
    split_by_top_level_comma(body)
        .into_iter()
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn split_by_top_level_comma(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in raw.chars() {
        if let Some(active_quote) = quote {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == active_quote {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }

        current.push(ch);
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    LineComment,
    BlockComment,
    Str,
    VerbatimStr,
    Char,
}

/// Removes `//` and `/* */` comments while leaving string and character
/// literals intact. Newlines inside comments are kept so line-anchored
/// patterns still see the original line structure.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = LexState::Code;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            LexState::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = LexState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    state = LexState::BlockComment;
                }
                // `@"..."` and the interpolated `@$"..."`.
                '@' if chars.peek() == Some(&'"') || chars.clone().take(2).eq(['$', '"']) => {
                    out.push(ch);
                    for next in chars.by_ref() {
                        out.push(next);
                        if next == '"' {
                            break;
                        }
                    }
                    state = LexState::VerbatimStr;
                }
                '"' => {
                    out.push(ch);
                    state = LexState::Str;
                }
                '\'' => {
                    out.push(ch);
                    state = LexState::Char;
                }
                _ => out.push(ch),
            },
            LexState::LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    state = LexState::Code;
                }
            }
            LexState::BlockComment => {
                if ch == '\n' {
                    out.push(ch);
                } else if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = LexState::Code;
                }
            }
            LexState::Str | LexState::Char => {
                out.push(ch);
                let closing = if state == LexState::Str { '"' } else { '\'' };
                if ch == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else if ch == closing || ch == '\n' {
                    state = LexState::Code;
                }
            }
            LexState::VerbatimStr => {
                out.push(ch);
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    } else {
                        state = LexState::Code;
                    }
                }
            }
        }
    }

    out
}

fn bare_instantiation_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?:this\.)?(?P<name>\w+)\s*=\s*new\s+(?P<kind>[\w.]+)\(\)\s*;")
            .expect("bare instantiation regex")
    })
}

fn initializer_instantiation_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?s)(?P<name>\w+)\s*=\s*new\s+(?P<kind>[\w.]+)\s*(?:\((?P<args>[^)]*)\))?\s*(?:\{(?P<init>.*?)\})?\s*;",
        )
        .expect("initializer instantiation regex")
    })
}

fn assignment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:this\.)?(?P<owner>\w+)\.(?P<prop>\w+)[ \t]*=[ \t]*(?P<value>[^\n]+?);[ \t\r]*$",
        )
        .expect("assignment regex")
    })
}

fn window_add_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"this\.Controls\.Add\(\s*(?:this\.)?(?P<child>\w+)\s*\)\s*;")
            .expect("window add regex")
    })
}

fn window_add_range_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"this\.Controls\.AddRange\(\s*new\s+[\w.]+\[\]\s*\{(?P<list>[^}]*)\}\s*\)\s*;")
            .expect("window add range regex")
    })
}

fn container_add_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?:this\.)?(?P<parent>\w+)\.Controls\.Add\(\s*(?:this\.)?(?P<child>\w+)\s*\)\s*;",
        )
        .expect("container add regex")
    })
}

fn container_add_range_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?:this\.)?(?P<parent>\w+)\.Controls\.AddRange\(\s*new\s+[\w.]+\[\]\s*\{(?P<list>[^}]*)\}\s*\)\s*;",
        )
        .expect("container add range regex")
    })
}

fn window_class_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"partial\s+class\s+(?P<name>\w+)\s*:\s*(?:System\.Windows\.Forms\.)?Form\b")
            .expect("window class regex")
    })
}

fn window_title_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"this\.Text\s*=\s*"(?P<text>.*?)";"#).expect("window title regex")
    })
}

fn client_size_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"this\.ClientSize\s*=\s*new\s+(?:System\.Drawing\.)?Size\((?P<w>\d+),\s*(?P<h>\d+)\)\s*;",
        )
        .expect("client size regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Owner {
        Owner::Named(name.to_string())
    }

    fn edges(events: &[CodeEvent]) -> Vec<(Owner, Vec<String>, EdgeShape)> {
        events
            .iter()
            .filter_map(|event| match event {
                CodeEvent::AddChildren {
                    parent,
                    children,
                    shape,
                } => Some((parent.clone(), children.clone(), *shape)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn strip_comments_keeps_strings_and_line_structure() {
        let source = "a = 1; // gone\n/* block\nspans */ b = \"http://x\"; c = '/';\nd = @\"C:\\\"\"//x\"; // tail";
        let stripped = strip_comments(source);
        assert_eq!(
            stripped,
            "a = 1; \n \n b = \"http://x\"; c = '/';\nd = @\"C:\\\"\"//x\"; "
        );
        assert_eq!(stripped.lines().count(), source.lines().count());
    }

    #[test]
    fn strip_comments_keeps_interpolated_verbatim_strings_whole() {
        let source = r#"a = @$"C:\{dir}\"; // tail
b = $@"D:\{dir}\"; /* gone */ c = 1;"#;
        assert_eq!(
            strip_comments(source),
            "a = @$\"C:\\{dir}\\\"; \nb = $@\"D:\\{dir}\\\";   c = 1;"
        );
    }

    #[test]
    fn designer_scan_emits_events_in_application_order() {
        let source = r#"
            this.panel1 = new System.Windows.Forms.Panel();
            this.button1 = new System.Windows.Forms.Button();
            this.components = new System.ComponentModel.Container();
            // this.ghost = new System.Windows.Forms.Label();
            this.panel1.Controls.Add(this.button1);
            this.button1.Location = new System.Drawing.Point(3, 4);
            this.button1.Click += new System.EventHandler(this.OnClick);
            this.Controls.Add(this.panel1);
            this.Text = "Main";
            this.ClientSize = new System.Drawing.Size(800, 450);
        "#;
        let events = scan_statements(source, ScanMode::Designer);

        assert_eq!(
            events[0],
            CodeEvent::Instantiate {
                name: "panel1".to_string(),
                kind: "Panel".to_string(),
                initializer: Vec::new(),
            }
        );
        let instantiated: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                CodeEvent::Instantiate { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(instantiated, vec!["panel1", "button1", "components"]);

        let assigned: Vec<(Owner, &str)> = events
            .iter()
            .filter_map(|event| match event {
                CodeEvent::Assign {
                    owner, property, ..
                } => Some((owner.clone(), property.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            assigned,
            vec![
                (Owner::Window, "panel1"),
                (Owner::Window, "button1"),
                (Owner::Window, "components"),
                (named("button1"), "Location"),
                (Owner::Window, "Text"),
                (Owner::Window, "ClientSize"),
            ]
        );

        assert_eq!(
            edges(&events),
            vec![
                (Owner::Window, vec!["panel1".to_string()], EdgeShape::WindowSingle),
                (named("panel1"), vec!["button1".to_string()], EdgeShape::ContainerSingle),
            ]
        );

        assert_eq!(
            &events[events.len() - 2..],
            &[
                CodeEvent::WindowTitle("Main".to_string()),
                CodeEvent::WindowClientSize { w: 800, h: 450 },
            ]
        );
    }

    #[test]
    fn batch_edges_split_and_strip_this() {
        // The window statement also fits the container pattern but is reported once.
        let source = r#"
            this.Controls.AddRange(new System.Windows.Forms.Control[] {
                this.a,
                this.b,
            });
            this.groupBox1.Controls.AddRange(new Control[] { c, this.d });
        "#;
        let events = scan_statements(source, ScanMode::Designer);
        assert_eq!(
            edges(&events),
            vec![
                (
                    Owner::Window,
                    vec!["a".to_string(), "b".to_string()],
                    EdgeShape::WindowBatch
                ),
                (
                    named("groupBox1"),
                    vec!["c".to_string(), "d".to_string()],
                    EdgeShape::ContainerBatch
                ),
            ]
        );
    }

    #[test]
    fn code_behind_scan_reads_initializer_blocks() {
        let source = r#"
            var ok = new Button { Text = "OK, go", Location = new Point(10, 20), Enabled = true };
            status = new System.Windows.Forms.Label("x");
            timer = new Timer();
            ok.BackColor = Color.Red;
        "#;
        let events = scan_statements(source, ScanMode::CodeBehind);
        assert_eq!(
            events[0],
            CodeEvent::Instantiate {
                name: "ok".to_string(),
                kind: "Button".to_string(),
                initializer: vec![
                    ("Text".to_string(), "\"OK, go\"".to_string()),
                    ("Location".to_string(), "new Point(10, 20)".to_string()),
                    ("Enabled".to_string(), "true".to_string()),
                ],
            }
        );
        assert!(matches!(
            &events[1],
            CodeEvent::Instantiate { name, kind, initializer }
                if name == "status" && kind == "Label" && initializer.is_empty()
        ));
        assert!(matches!(
            &events[2],
            CodeEvent::Instantiate { name, kind, .. } if name == "timer" && kind == "Timer"
        ));
        assert_eq!(
            events[3],
            CodeEvent::Assign {
                owner: named("ok"),
                property: "BackColor".to_string(),
                value: "Color.Red".to_string(),
            }
        );
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn assignments_must_lead_their_line() {
        let source = "this.button1.FlatAppearance.BorderSize = 0;\nif (x) y.Text = \"a\";\n  base.Text = \"T\";\r\n";
        let events = scan_statements(source, ScanMode::Designer);
        assert_eq!(
            events,
            vec![CodeEvent::Assign {
                owner: Owner::Window,
                property: "Text".to_string(),
                value: "\"T\"".to_string(),
            }]
        );
    }

    #[test]
    fn split_initializer_respects_nesting() {
        assert_eq!(
            split_initializer(" Size = new Size(1, 2), Tag = new[] { 1, 2 }, Name = \"a=b\", junk "),
            vec![
                ("Size".to_string(), "new Size(1, 2)".to_string()),
                ("Tag".to_string(), "new[] { 1, 2 }".to_string()),
                ("Name".to_string(), "\"a=b\"".to_string()),
            ]
        );
        assert!(split_initializer("").is_empty());
    }

    #[test]
    fn find_window_class_requires_form_base() {
        assert_eq!(
            find_window_class("public partial class MainForm : Form\n{"),
            Some("MainForm".to_string())
        );
        assert_eq!(
            find_window_class("partial class Editor : System.Windows.Forms.Form {}"),
            Some("Editor".to_string())
        );
        assert_eq!(find_window_class("partial class Helper : UserControl {}"), None);
        assert_eq!(find_window_class("// partial class Old : Form"), None);
        assert_eq!(find_window_class("partial class Base : FormBase {}"), None);
    }
}
