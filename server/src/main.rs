use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use moodlog_server::config::{Cli, Command};
use moodlog_server::{seed, telemetry, EntryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_format)?;

    let store = EntryStore::open(&cli.database)
        .await
        .with_context(|| format!("failed to open database `{}`", cli.database.display()))?;

    match cli.command() {
        Command::Serve => {
            seed::seed_if_empty(&store).await?;

            let config = cli.server_config();
            let addr = config.socket_addr();
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!("API ready on http://{addr}");
            moodlog_server::serve(listener, store, &config).await?;
        }
        Command::Reset => {
            let inserted = seed::reset(&store).await?;
            info!(inserted, "database reset with fresh sample data");
        }
    }

    Ok(())
}
