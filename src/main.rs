//! preconfig CLI entry point.
//!
//! Parses arguments, resolves the template named by them, and prints
//! the result — or a colored, suggestion-bearing error — to stderr.

use clap::Parser;
use preconfig::cli::Cli;
use preconfig::error::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let rust_log_exists = std::env::var("RUST_LOG").is_ok();
    let filter = if rust_log_exists {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.run() {
        Ok(output) => println!("{output}"),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
