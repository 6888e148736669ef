// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};

/// Number of questions sampled into one quiz paper.
pub const QUIZ_QUESTION_COUNT: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    pub public_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://prephub.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());

        Self {
            database_url,
            rust_log,
            port,
            public_dir,
        }
    }

    /// Location of the question bank inside the static asset directory.
    pub fn questions_path(&self) -> PathBuf {
        Path::new(&self.public_dir).join("data").join("questions.json")
    }
}
