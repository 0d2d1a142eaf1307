//! ertidy CLI - Repair machine-generated Mermaid.js ER diagrams

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    // Logging is configured inside run() so the CLI flags can take part
    let cli_args = cli::Cli::parse();

    let app = cli::TidyApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
