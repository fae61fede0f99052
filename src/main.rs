use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use headlines::app::HeadlineService;
use headlines::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("headlines=info")))
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    match cli.command {
        Commands::Top { filter, limit } => {
            let service = HeadlineService::new(&config)?;
            commands::top(&service, &filter, limit).await?;
        }
        Commands::Export {
            format,
            filter,
            limit,
            output,
        } => {
            let service = HeadlineService::new(&config)?;
            commands::export(&service, &format, &filter, limit, output.as_deref()).await?;
        }
        Commands::Config => {
            commands::show_config(&config, cli.config.as_deref())?;
        }
    }

    Ok(())
}
