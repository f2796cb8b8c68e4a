use client_http::{RequestClient, ReqwestTransport, UserApi};
use satchel::auth::UserSession;
use satchel::{CacheStore, TracingFeedback};
use shared::config::AppConfig;
use std::path::Path;
use std::sync::Arc;
use storage_engine::SledBackend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: satchel <info | login <username> <password> | me | logout | clear>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the filter reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = AppConfig::from_env();
    info!(
        environment = config.environment.as_str(),
        api = %config.api_base_url,
        "Starting {} {}",
        config.app.name,
        config.app.version
    );

    // Storage
    let db_path = Path::new(&config.cache.data_dir).join("cache.sled");
    let backend = Arc::new(SledBackend::open(&db_path, config.cache.limit_bytes)?);
    let cache = Arc::new(CacheStore::from_config(backend, &config));
    let session = Arc::new(UserSession::new(cache.clone()));

    // HTTP
    let transport = Arc::new(ReqwestTransport::new()?);
    let client = Arc::new(RequestClient::new(
        &config,
        transport,
        session.clone(),
        Arc::new(TracingFeedback),
    ));
    let users = UserApi::new(client);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["info"] => {
            println!("{}", serde_json::to_string_pretty(&cache.get_info())?);
        }
        ["login", username, password] => {
            let response = users.login(username, password).await?;
            let data = response.data().cloned().unwrap_or_default();

            match data.get("token").and_then(|t| t.as_str()) {
                Some(token) => session.set_token(token)?,
                None => warn!("Login response carried no token"),
            }
            if let Some(user_info) = data.get("userInfo") {
                session.set_user_info(user_info)?;
            }
            info!(username, "Signed in");
        }
        ["me"] => {
            if !session.is_logged_in() {
                println!("not signed in");
                return Ok(());
            }
            let response = users.get_user_info().await?;
            if let Some(user_info) = response.data() {
                session.set_user_info(user_info)?;
            }
            println!("{}", serde_json::to_string_pretty(&session.user_info())?);
        }
        ["logout"] => {
            if session.is_logged_in() {
                if let Err(e) = users.logout().await {
                    warn!(error = %e, "Server-side logout failed, clearing local session anyway");
                }
            }
            session.logout()?;
        }
        ["clear"] => {
            cache.clear()?;
            info!("Cache cleared");
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
