use std::io::IsTerminal;

use leanix_publish::cli::{exit_code, parse_args, run};

#[tokio::main]
async fn main() {
    let cli = parse_args();

    // Diagnostics go to stdout as human-readable lines.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
    tracing::info!("CLI application startup: tracing initialised");

    match run(cli).await {
        Ok(report) => {
            println!("Publish complete.\nReport:");
            println!("{:#?}", report);
            std::process::exit(0);
        }
        Err(e) => {
            println!("[ERROR] Publish failed: {:#}", e);
            std::process::exit(exit_code(&e));
        }
    }
}
