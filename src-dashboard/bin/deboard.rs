use std::process;

use clap::Parser;
use deboard::{Cli, run};

#[tokio::main]
async fn main() {
    deboard_env::init_logging();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout();
    if let Err(e) = run(cli, &mut stdout).await {
        log::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
