use anyhow::Result;
use clap::Parser;

use mnist_fetch::commands;

#[derive(Parser)]
#[clap(name = "mnist-fetch")]
#[clap(about = "Download and unpack the MNIST dataset into the project data directory")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let result = commands::fetch::run().map_err(|e| anyhow::anyhow!(e));

    match result {
        Ok(report) => {
            let code = report.outcome.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
