use std::path::PathBuf;

use kite_core::{KiteError, UiTree};

/// A file that contributed nothing because it could not be read or parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub error: KiteError,
}

/// Outcome of parsing every window file of one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub roots: Vec<UiTree>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ParseReport {
    pub(crate) fn record(&mut self, path: PathBuf, outcome: Result<Option<UiTree>, KiteError>) {
        match outcome {
            Ok(Some(root)) => {
                tracing::debug!(path = %path.display(), window = root.name(), nodes = root.len(), "window recovered");
                self.roots.push(root);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "file skipped");
                self.diagnostics.push(FileDiagnostic { path, error });
            }
        }
    }

    pub fn window_names(&self) -> Vec<&str> {
        self.roots.iter().map(UiTree::name).collect()
    }
}
