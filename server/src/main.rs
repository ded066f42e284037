use bakehouse_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv before config so .env values are visible)
    dotenv::dotenv().ok();

    // 2. Load configuration and set up logging
    let config = Config::from_env();
    init_logger_with_file(None, config.log_dir.as_deref());

    print_banner();
    tracing::info!("Bakehouse server starting...");

    // 3. Initialize server state (db, notification worker, token service)
    let state = ServerState::initialize(&config).await;

    // 4. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
