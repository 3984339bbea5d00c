//! Flipbook brochure generation API server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use flipbook_ai::config::parse_model_list;
use flipbook_ai::AiConfig;
use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("FLIPBOOK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "configure-ai" => {
                if args.len() < 3 {
                    eprintln!("Usage: flipbook configure-ai <api-key> [model,model,...]");
                    std::process::exit(1);
                }
                let config = flipbook_core::FlipbookConfig::from_env(resolve_data_dir())?;
                let mut ai_config = AiConfig::from_file(&config.data_paths.ai_config_file);
                ai_config.api_key = Some(args[2].clone());
                if let Some(models) = args.get(3).map(|raw| parse_model_list(raw)) {
                    if !models.is_empty() {
                        ai_config.models = models;
                    }
                }
                ai_config.save()?;
                println!("AI configuration saved to {}", ai_config.config_path.display());
                return Ok(());
            }
            "check-ai" => {
                let config = flipbook_core::FlipbookConfig::from_env(resolve_data_dir())?;
                let ai_config = AiConfig::load(&config.data_paths.ai_config_file);
                let Some(api_key) = ai_config.api_key() else {
                    eprintln!("No API key configured (set GEMINI_API_KEY or run configure-ai).");
                    std::process::exit(1);
                };
                match flipbook_ai::providers::test_api_key(api_key).await {
                    Ok(()) => println!("API key accepted. Models: {}", ai_config.models.join(", ")),
                    Err(e) => {
                        eprintln!("API key check failed: {}", e);
                        std::process::exit(1);
                    }
                }
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("Flipbook brochure generation API server");
                println!();
                println!("Usage: flipbook [command]");
                println!();
                println!("Commands:");
                println!("  (none)                          Start the server");
                println!("  configure-ai <key> [models]     Save the Gemini key and model list");
                println!("  check-ai                        Verify the configured Gemini key");
                println!("  help                            Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'flipbook help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    let config = flipbook_core::FlipbookConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = flipbook_store::BrochureStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let ai_config = AiConfig::load(&config.data_paths.ai_config_file);

    let state = Arc::new(AppState::new(config, store, ai_config));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Flipbook server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
