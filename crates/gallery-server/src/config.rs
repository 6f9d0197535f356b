use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Username every template write is attributed to.
    pub default_username: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("GALLERY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("GALLERY_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("GALLERY_PORT must be a port number")?;
        let db_path: PathBuf = std::env::var("GALLERY_DB_PATH")
            .unwrap_or_else(|_| "workflow_templates.db".into())
            .into();
        let default_username = std::env::var("GALLERY_DEFAULT_USERNAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "Default API User".into());

        Ok(Self {
            host,
            port,
            db_path,
            default_username,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
