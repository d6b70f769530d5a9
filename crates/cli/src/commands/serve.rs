use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum_extra::extract::cookie::Key;
use clap::Args;
use natura_core::{
    DEFAULT_USER_ID, GBIF_API_URL, GBIF_MAX_RETRIES, IMAGE_CACHE_TTL_SECS, IMAGE_FANOUT_LIMIT,
    PLANTNET_API_URL, env_parse_with_default,
};
use natura_gbif::{GbifClient, ImageCache, RetryPolicy};
use natura_http::{AppState, Auth, OAuthConfig, create_router};
use natura_identify::PlantNetClient;
use natura_service::{CollectionService, PlantService};
use natura_storage::StorageBackend;
use natura_storage::traits::UserStore;

/// Minimum length of `NATURA_COOKIE_KEY`, in bytes.
const COOKIE_KEY_MIN_BYTES: usize = 64;

#[derive(Args)]
pub(crate) struct ServeArgs {
    #[arg(short, long, env = "NATURA_PORT", default_value = "5000")]
    port: u16,
    #[arg(short = 'H', long, env = "NATURA_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Pl@ntNet API key
    #[arg(long, env = "PLANTNET_API_KEY", hide_env_values = true)]
    plantnet_api_key: String,
    #[arg(long, env = "PLANTNET_API_URL", default_value = PLANTNET_API_URL)]
    plantnet_api_url: String,
    #[arg(long, env = "GBIF_API_URL", default_value = GBIF_API_URL)]
    gbif_api_url: String,
    /// Microsoft application (client) id; login is disabled without it
    #[arg(long, env = "MICROSOFT_CLIENT_ID")]
    microsoft_client_id: Option<String>,
    #[arg(long, env = "MICROSOFT_CLIENT_SECRET", hide_env_values = true)]
    microsoft_client_secret: Option<String>,
    /// Externally visible origin, used for the OAuth redirect URI
    #[arg(long, env = "NATURA_PUBLIC_URL")]
    public_url: Option<String>,
    /// Cookie signing key, at least 64 bytes; random per process when unset
    #[arg(long, env = "NATURA_COOKIE_KEY", hide_env_values = true)]
    cookie_key: Option<String>,
    /// Collection owner for requests without a session
    #[arg(long, env = "NATURA_DEFAULT_USER", default_value = DEFAULT_USER_ID)]
    default_user: String,
}

pub(crate) async fn run(database_url: &str, args: ServeArgs) -> Result<()> {
    let key = cookie_key(args.cookie_key.as_deref())?;

    let storage = Arc::new(StorageBackend::connect(database_url).await?);
    tracing::info!(backend = storage.kind(), "storage ready");
    if storage.get_user(&args.default_user).await?.is_none() {
        tracing::warn!(user = %args.default_user, "default user does not exist, identify will fail");
    }

    let max_retries = env_parse_with_default("NATURA_GBIF_MAX_RETRIES", GBIF_MAX_RETRIES);
    let cache_ttl = env_parse_with_default("NATURA_IMAGE_CACHE_TTL_SECS", IMAGE_CACHE_TTL_SECS);
    let fanout = env_parse_with_default("NATURA_IMAGE_FANOUT", IMAGE_FANOUT_LIMIT);

    let gbif = Arc::new(
        GbifClient::new(&args.gbif_api_url)?
            .with_cache(ImageCache::new(Duration::from_secs(cache_ttl)))
            .with_retry_policy(RetryPolicy { max_retries, ..RetryPolicy::default() }),
    );
    let identifier = Arc::new(PlantNetClient::new(args.plantnet_api_key, &args.plantnet_api_url)?);

    let plant_service =
        Arc::new(PlantService::new(Arc::clone(&storage), identifier, Arc::clone(&gbif)));
    let collection_service =
        Arc::new(CollectionService::new(storage, gbif).with_fanout(fanout));

    let mut auth = Auth::new(key, args.default_user);
    match (args.microsoft_client_id, args.microsoft_client_secret) {
        (Some(client_id), Some(client_secret)) => {
            let public_url =
                args.public_url.unwrap_or_else(|| format!("http://{}:{}", args.host, args.port));
            auth = auth
                .with_oauth(&OAuthConfig::microsoft(client_id, client_secret, public_url))
                .context("invalid OAuth configuration")?;
            tracing::info!("Microsoft account login enabled");
        },
        _ => tracing::warn!("MICROSOFT_CLIENT_ID/MICROSOFT_CLIENT_SECRET not set, login disabled"),
    }

    let state = Arc::new(AppState { plant_service, collection_service, auth });
    let router = create_router(state);
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

fn cookie_key(raw: Option<&str>) -> Result<Key> {
    match raw {
        Some(raw) => {
            let bytes = raw.as_bytes();
            if bytes.len() < COOKIE_KEY_MIN_BYTES {
                anyhow::bail!(
                    "NATURA_COOKIE_KEY must be at least {COOKIE_KEY_MIN_BYTES} bytes, got {}",
                    bytes.len()
                );
            }
            Key::try_from(bytes).map_err(|e| anyhow::anyhow!("invalid NATURA_COOKIE_KEY: {e}"))
        },
        None => {
            tracing::warn!("NATURA_COOKIE_KEY not set, sessions will not survive a restart");
            Ok(Key::generate())
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
