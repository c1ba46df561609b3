//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;

/// How many items each page section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Popular posts and popular tags sidebars.
    pub sidebar: u64,
    /// Posts listed on a tag page.
    pub tag_posts: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            sidebar: 5,
            tag_posts: 20,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Public prefix for uploaded images.
    pub media_url: String,
    pub pages: PageLimits,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_env("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_env("DB_MIN_CONNECTIONS", defaults.min_connections),
                sqlx_logging: parse_env("DB_LOG_QUERIES", defaults.sqlx_logging),
                ..defaults
            }
        });

        let defaults = PageLimits::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env("PORT", 8080),
            database,
            media_url: env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string()),
            pages: PageLimits {
                sidebar: parse_env("SIDEBAR_LIMIT", defaults.sidebar),
                tag_posts: parse_env("TAG_PAGE_LIMIT", defaults.tag_posts),
            },
        }
    }
}

/// Read and parse a variable, falling back to `default` when unset or malformed.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %raw, "Ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}
