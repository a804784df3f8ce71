mod app;
mod cli;
mod error;
mod http;

use std::process::exit;

use clap::Parser;
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();
    match app::run(cli) {
        Ok(status) => exit(status),
        Err(err) => {
            eprintln!("{}: {err}", program_name());
            exit(err.exit_code());
        }
    }
}

fn program_name() -> String {
    let arg0 = std::env::args().next().unwrap_or_default();
    std::path::Path::new(&arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chknew".to_string())
}
