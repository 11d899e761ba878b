use std::env;

use crate::application::admin_auth::AdminCredentials;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Token signing key.
    pub secret_key: String,
    pub admin: AdminCredentials,
    pub smtp: SmtpConfig,
}

impl Config {
    /// Read configuration from the environment. Runs once at startup, so a
    /// missing required variable is fatal.
    pub fn from_env() -> Self {
        Config {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            secret_key: env::var("SECRET_KEY").expect("SECRET_KEY must be set"),
            admin: AdminCredentials {
                username: env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set"),
                password_hash: env::var("ADMIN_PASSWORD_HASH")
                    .expect("ADMIN_PASSWORD_HASH must be set"),
            },
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").expect("SMTP_HOST must be set"),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .expect("SMTP_PORT must be a valid number"),
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
                from_address: env::var("SMTP_FROM").expect("SMTP_FROM must be set"),
            },
        }
    }
}
