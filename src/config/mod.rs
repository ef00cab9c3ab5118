use crate::util::env::{get_bool_from_env_or, get_env_or, get_vec_from_env_or, load_dotenv};
use anyhow::{bail, Result};
use std::time::Duration;

pub mod db;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Basic app info
    pub app_name: String,

    // Listing settings
    pub posts_per_page: i64,
    pub max_posts_per_page: i64,
    pub page_size_options: Vec<i64>,
    pub recent_posts: i64,
    pub request_timeout_secs: u64,

    pub static_url: String,
    pub static_path: String,

    // Server settings
    pub http: HTTPConfig,
    pub db: DBConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct HTTPConfig {
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DBConfig {
    pub url: String,
    pub pool_size: u32,
    pub auto_migrate: bool,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_requests: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(AppConfig {
            app_name: get_env_or("APP_NAME", "Plume".to_string())?,

            posts_per_page: get_env_or("POSTS_PER_PAGE", 10)?,
            max_posts_per_page: get_env_or("MAX_POSTS_PER_PAGE", 100)?,
            page_size_options: get_vec_from_env_or("PAGE_SIZE_OPTIONS", vec![10, 20, 30])?,
            recent_posts: get_env_or("RECENT_POSTS", 10)?,
            request_timeout_secs: get_env_or("REQUEST_TIMEOUT_SECS", 10)?,

            static_url: get_env_or("STATIC_URL", "/static".to_string())?,
            static_path: get_env_or("STATIC_PATH", "./static".to_string())?,

            http: HTTPConfig::from_env()?,
            db: DBConfig::from_env()?,
            log: LogConfig::from_env()?,
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.posts_per_page < 1 {
            bail!("POSTS_PER_PAGE must be at least 1");
        }
        if self.max_posts_per_page < self.posts_per_page {
            bail!("MAX_POSTS_PER_PAGE must not be smaller than POSTS_PER_PAGE");
        }
        if let Some(option) = self
            .page_size_options
            .iter()
            .find(|o| **o < 1 || **o > self.max_posts_per_page)
        {
            bail!("PAGE_SIZE_OPTIONS contains out of range value {}", option);
        }
        if self.recent_posts < 1 {
            bail!("RECENT_POSTS must be at least 1");
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            bail!(
                "REQUEST_TIMEOUT_SECS must be between 1 and {}",
                MAX_REQUEST_TIMEOUT_SECS
            );
        }
        if !self.static_url.starts_with('/') {
            bail!("STATIC_URL must start with '/'");
        }
        if self.db.pool_size == 0 {
            bail!("DATABASE_POOL_SIZE must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl HTTPConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(HTTPConfig {
            ip: get_env_or("HTTP_IP", "127.0.0.1".to_string())?,
            port: get_env_or("HTTP_PORT", 8000)?,
        })
    }
}

impl DBConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(DBConfig {
            url: get_env_or("DATABASE_URL", "sqlite:blog.db".to_string())?,
            pool_size: get_env_or("DATABASE_POOL_SIZE", 5)?,
            auto_migrate: get_bool_from_env_or("DATABASE_AUTO_MIGRATE", true)?,
        })
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(LogConfig {
            log_requests: get_bool_from_env_or("LOG_REQUESTS", false)?,
        })
    }
}
