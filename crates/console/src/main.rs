use lore_client::api::HttpCharacterApi;
use lore_client::config::ClientConfig;
use lore_console::shell::Shell;
use lore_console::terminal::TerminalSurface;
use lore_console::DEFAULT_LOG_FILTER;
use lore_ui::controller::CharacterListController;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so they do not interleave with the list on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Loaded client configuration");

    // --- Controller ---
    let api = HttpCharacterApi::new(config.api_url.clone());
    let surface = TerminalSurface::new(std::io::stdout());
    let controller = CharacterListController::new(api, surface, config.fade_delay);

    let mut shell = Shell::new(controller, BufReader::new(tokio::io::stdin()));
    shell.run().await?;

    Ok(())
}
