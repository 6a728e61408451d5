use std::process;

use clap::Parser;
use vcodegen::cli::{log_level, Cli};

fn main() {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(log_level(cli.verbose));
    env_logger::Builder::from_env(env).init();

    let stdout = std::io::stdout();
    if let Err(err) = vcodegen::run(&cli, &mut stdout.lock()) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
