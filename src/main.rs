use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=csvq=debug shows pipeline stages; logs never touch stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("csvq=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(error) = csvq::run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
