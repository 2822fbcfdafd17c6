use std::path::PathBuf;

// This main function is the entry point when running `cargo run -p web-server`.
// It loads `config.toml` (or the path in RECOMMENDER_CONFIG) and serves the index.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::var_os("RECOMMENDER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = configuration::load_config_or_default(&path)?;
    let _guard = configuration::init_tracing(&config.logging)?;

    web_server::run_server(config).await
}
