use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use kite_api::{detect_kind, recover_project, resolve_project_root, ProjectKind, RecoverOptions};
use kite_core::KiteError;

mod cli_args;
mod error_map;
mod render;

pub(crate) use cli_args::{Cli, DetectArgs, InspectArgs, Mode};
pub(crate) use error_map::{
    emit_error, map_cli_input_path, map_cli_kind_invalid, map_cli_output_json,
};
pub(crate) use render::{diagnostics_json, windows_json};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, KiteError> {
    match cli.command {
        Mode::Inspect(args) => run_inspect(args),
        Mode::Detect(args) => run_detect(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<i32, KiteError> {
    let input = resolve_input(&args.input)?;
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<ProjectKind>)
        .transpose()
        .map_err(map_cli_kind_invalid)?;

    let recovered = recover_project(&RecoverOptions { input, kind })?;
    let windows = windows_json(&recovered.report.roots, recovered.kind)?;
    let diagnostics = if args.diagnostics {
        Some(diagnostics_json(&recovered.report.diagnostics)?)
    } else {
        None
    };

    println!("RESULT:OK");
    println!("KIND:{}", recovered.kind);
    println!("WINDOWS_JSON:{}", windows);
    if let Some(diagnostics) = diagnostics {
        println!("DIAGNOSTICS_JSON:{}", diagnostics);
    }
    Ok(0)
}

fn run_detect(args: DetectArgs) -> Result<i32, KiteError> {
    let input = resolve_input(&args.input)?;
    let root = resolve_project_root(&input)?;
    println!("RESULT:OK");
    println!("KIND:{}", detect_kind(&root));
    Ok(0)
}

pub(crate) fn resolve_input(raw: &str) -> Result<PathBuf, KiteError> {
    let path = PathBuf::from(raw);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_input_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(KiteError::with_path(
            "CLI_INPUT_NOT_FOUND",
            format!("input does not exist: {}", absolute.display()),
            &absolute,
        ));
    }
    Ok(absolute)
}

#[cfg(test)]
mod tests;
