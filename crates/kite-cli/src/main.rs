use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    std::process::exit(kite_cli::run_cli_from_args(std::env::args_os()));
}

/// Logs go to stderr so stdout stays machine readable. `KITE_LOG` takes
/// `EnvFilter` directives, e.g. `KITE_LOG=kite_recover=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("KITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
