//! lockloop CLI - turn a day of hourly weather into a storyboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "lockloop-cli",
    version,
    about = "Weather storyboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: lockloop_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("lockloop-cli {}", env!("CARGO_PKG_VERSION"));
    lockloop_cmd::run(cli.command).await
}
