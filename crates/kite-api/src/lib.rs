use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use kite_core::{KiteError, UiTree};
use kite_recover::{find_files, parse_winforms_project, parse_wpf_project, read_source};

pub use kite_recover::{FileDiagnostic, ParseReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    WinForms,
    Wpf,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WinForms => "winforms",
            Self::Wpf => "wpf",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = KiteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "winforms" => Ok(Self::WinForms),
            "wpf" => Ok(Self::Wpf),
            _ => Err(KiteError::new(
                "PROJECT_KIND_INVALID",
                format!("Unknown project kind \"{}\". Expected winforms or wpf.", raw),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecoverOptions {
    /// Project directory, or a file inside it such as a `.csproj`.
    pub input: PathBuf,
    /// Detected from the project contents when absent.
    pub kind: Option<ProjectKind>,
}

impl RecoverOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: ProjectKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recovered {
    pub kind: ProjectKind,
    pub root: PathBuf,
    pub report: ParseReport,
}

/// Receives recovered windows one at a time, in recovery order.
pub trait WindowGenerator {
    fn generate_window(&mut self, window: &UiTree) -> Result<(), KiteError>;
}

pub fn resolve_project_root(input: &Path) -> Result<PathBuf, KiteError> {
    if input.is_dir() {
        return Ok(input.to_path_buf());
    }
    if input.is_file() {
        return Ok(match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        });
    }
    Err(KiteError::with_path(
        "PROJECT_NOT_FOUND",
        format!("Project path does not exist: {}", input.display()),
        input,
    ))
}

/// Markup wins over designer files; project files decide only when neither
/// is present.
pub fn detect_kind(root: &Path) -> ProjectKind {
    if !find_files(root, &["*.xaml"]).is_empty() {
        return ProjectKind::Wpf;
    }
    if !find_files(root, &["*.Designer.cs"]).is_empty() {
        return ProjectKind::WinForms;
    }

    let Some(project_file) = find_files(root, &["*.csproj"]).into_iter().next() else {
        return ProjectKind::WinForms;
    };
    match read_source(&project_file) {
        Ok(text) if project_file_targets_wpf(&text) => ProjectKind::Wpf,
        Ok(_) => ProjectKind::WinForms,
        Err(error) => {
            tracing::warn!(path = %project_file.display(), %error, "project file unreadable");
            ProjectKind::WinForms
        }
    }
}

fn project_file_targets_wpf(text: &str) -> bool {
    let compact: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("<usewpf>true</usewpf>")
        || (compact.contains("<outputtype>winexe</outputtype>") && compact.contains(".xaml"))
}

pub fn recover_project(options: &RecoverOptions) -> Result<Recovered, KiteError> {
    let root = resolve_project_root(&options.input)?;
    let kind = options.kind.unwrap_or_else(|| detect_kind(&root));
    tracing::info!(root = %root.display(), %kind, "recovering windows");

    let report = match kind {
        ProjectKind::WinForms => parse_winforms_project(&root),
        ProjectKind::Wpf => parse_wpf_project(&root),
    };

    if report.roots.is_empty() {
        return Err(KiteError::with_path(
            "PROJECT_EMPTY",
            "No windows/forms found to convert.",
            &root,
        ));
    }

    tracing::info!(
        windows = report.roots.len(),
        skipped = report.diagnostics.len(),
        "recovery finished"
    );
    Ok(Recovered { kind, root, report })
}

pub fn convert_project(
    options: &RecoverOptions,
    generator: &mut dyn WindowGenerator,
) -> Result<Recovered, KiteError> {
    let recovered = recover_project(options)?;
    for window in &recovered.report.roots {
        tracing::debug!(window = window.name(), "generating window");
        generator.generate_window(window)?;
    }
    Ok(recovered)
}
