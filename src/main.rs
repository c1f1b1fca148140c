use clap::Parser;
use finnews::api::{self, AppState};
use finnews::cli::commands::{Cli, Commands};
use finnews::config::AppConfig;
use finnews::{news_provider, FinNews};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,finnews=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let loaded = match &cli.env_file {
        Some(path) => AppConfig::from_env_file(path),
        None => AppConfig::from_env(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    mut config: AppConfig,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }

            // Models are resolved before the listener exists.
            let state = AppState::from_config(&config).await?;
            if let Some(path) = state.finnews.source_path() {
                tracing::info!(source_path = %path, "Financial News Analyzer API ready");
            }

            let listener = TcpListener::bind(&config.bind_addr).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, api::router(state)).await?;
        }
        Commands::Analyze { text } => {
            let finnews = FinNews::new(&config).await?;
            let result = finnews.analyze(&text).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::News { ticker } => {
            let finnews = FinNews::from_parts(None, news_provider(&config.news));
            let articles = finnews.fetch_news(&ticker).await?;
            println!("{}", serde_json::to_string_pretty(&articles)?);
        }
    }
    Ok(())
}
