pub mod chain;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod server;
pub mod session;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use cli::Args;
use llm::LlmConfig;
use server::Server;
use session::SessionStore;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    if !llm::is_supported_model(&args.chat_model) {
        return Err(format!("Unsupported chat model: {}", args.chat_model).into());
    }

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", args.chat_model);
    if let Some(base_url) = &args.chat_base_url {
        info!("Chat Base URL: {}", base_url);
    }
    info!("Session Idle TTL: {}s", args.session_idle_secs);
    info!("-------------------------");

    let defaults = LlmConfig {
        api_key: args.groq_api_key.clone(),
        model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
    };

    // Fail fast on a malformed credential before accepting connections.
    llm::chat::new_client(&defaults)?;

    let store = Arc::new(
        SessionStore::new(defaults, Duration::from_secs(args.session_idle_secs))
    );

    info!("Starting server on: {}", args.server_addr);
    let server = Server::new(args.server_addr.clone(), store);
    server.run().await?;

    Ok(())
}
