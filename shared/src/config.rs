use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub metrics: MetricsConfig,
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?
                .parse()
                .context("REDIS_PORT must be a port number")?,
        };
        let auth = AuthConfig {
            ttl: match std::env::var("AUTH_TOKEN_TTL") {
                Ok(v) => v.parse().context("AUTH_TOKEN_TTL must be seconds")?,
                Err(_) => DEFAULT_TOKEN_TTL,
            },
        };
        let metrics = MetricsConfig {
            port: std::env::var("METRICS_PORT")
                .ok()
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("METRICS_PORT must be a port number")?,
        };
        let admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_EMAIL"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(AdminConfig {
                username,
                email,
                password,
            }),
            _ => None,
        };
        Ok(Self {
            database,
            redis,
            auth,
            metrics,
            admin,
        })
    }
}

const DEFAULT_TOKEN_TTL: u64 = 86400;

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    /// Access token lifetime in seconds.
    pub ttl: u64,
}

pub struct MetricsConfig {
    /// Prometheus exporter port; metrics are not exported when unset.
    pub port: Option<u16>,
}

/// Administrator account created at startup when all three variables are set.
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}
