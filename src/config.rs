use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres URL; without one games live in memory
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Slash command shown in help text
    pub command_name: String,
    /// Where rendered prompts are POSTed; logged only when unset
    pub presenter_webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            chat: ChatConfig {
                command_name: "/oxo".to_string(),
                presenter_webhook_url: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| defaults.database.max_connections.to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
        };

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or(defaults.server.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.server.port.to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let chat = ChatConfig {
            command_name: env::var("COMMAND_NAME").unwrap_or(defaults.chat.command_name),
            presenter_webhook_url: env::var("PRESENTER_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        };

        Ok(Config {
            database,
            server,
            chat,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database.url.as_deref()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
