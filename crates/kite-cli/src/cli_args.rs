use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kite")]
#[command(about = "Recover UI widget trees from WinForms and WPF projects")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Print the recovered window trees as JSON.
    Inspect(InspectArgs),
    /// Print the detected project kind.
    Detect(DetectArgs),
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    #[arg(long = "input")]
    pub(crate) input: String,
    #[arg(long = "kind")]
    pub(crate) kind: Option<String>,
    #[arg(long = "diagnostics")]
    pub(crate) diagnostics: bool,
}

#[derive(Debug, Args)]
pub(crate) struct DetectArgs {
    #[arg(long = "input")]
    pub(crate) input: String,
}
