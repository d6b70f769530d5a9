//! Shared constants for natura.
//!
//! Centralizes defaults that several crates need to agree on.

/// Id of the single collection owner seeded by the migrations.
pub const DEFAULT_USER_ID: &str = "natura";

/// Email of the seeded collection owner.
pub const DEFAULT_USER_EMAIL: &str = "natura@natura.com";

/// Maximum number of common names taken from a vernacular-name lookup.
pub const MAX_VERNACULAR_NAMES: usize = 3;

/// Sliding expiration for cached GBIF image lookups (6 hours).
pub const IMAGE_CACHE_TTL_SECS: u64 = 6 * 60 * 60;

/// Upper bound on the number of species keys held by the image cache.
pub const IMAGE_CACHE_MAX_ENTRIES: u64 = 10_000;

/// Retries after the first attempt for transient GBIF failures.
pub const GBIF_MAX_RETRIES: usize = 3;

/// First retry delay; doubles on every further attempt (1s, 2s, 4s).
pub const GBIF_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Timeout for a single outbound HTTP request.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Concurrent image lookups while building a collection view.
pub const IMAGE_FANOUT_LIMIT: usize = 8;

/// Default GBIF API root.
pub const GBIF_API_URL: &str = "https://api.gbif.org/v1";

/// Default Pl@ntNet API root.
pub const PLANTNET_API_URL: &str = "https://my-api.plantnet.org";

/// Default database location used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://natura.db?mode=rwc";

/// GBIF kingdom key for Plantae.
pub const KINGDOM_KEY_PLANTAE: u32 = 6;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// SQLite connection pool: maximum connections for file databases.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 5;

/// Name of the signed session cookie.
pub const SESSION_COOKIE_NAME: &str = "natura.user";

/// Name of the signed cookie carrying OAuth state between login and callback.
pub const OAUTH_STATE_COOKIE_NAME: &str = "natura.oauth";

/// Session cookie lifetime in minutes.
pub const SESSION_TTL_MINUTES: i64 = 30;

/// Maximum accepted size of an uploaded image body (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
