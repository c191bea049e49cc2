use anyhow::Result;
use clap::Parser;

use window_control::cli::{Cli, Commands, handle_client_command};
use window_control::{config, daemon};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    daemon::init_logging();

    match cli.command {
        None | Some(Commands::Serve) => daemon::run(cli.config.as_deref()).await,
        Some(cmd) => {
            let config = config::load_app_config(cli.config.as_deref());
            if !handle_client_command(cmd, &config).await? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
