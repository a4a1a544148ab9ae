use paperlane_api::setup;
use paperlane_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, upstream clients, routes)
    let (_state, router) = setup::initialize_app(config.clone())?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
