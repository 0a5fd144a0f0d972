//! Configuration management for the Flipbook server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default upload ceiling: 100MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Default rasterization resolution
pub const DEFAULT_RENDER_DPI: f32 = 200.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static` (stylesheet, turn.js, client script)
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: Option<String>,
    /// Base URL browsers use to fetch page images. Defaults to `<endpoint>/<bucket>`.
    pub public_url: Option<String>,
    /// Key prefix under which every flipbook's pages are written
    pub key_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Minio,
    R2,
    S3,
    B2,
}

impl StorageProvider {
    fn from_name(name: &str) -> Self {
        match name {
            "r2" => StorageProvider::R2,
            "s3" => StorageProvider::S3,
            "b2" => StorageProvider::B2,
            _ => StorageProvider::Minio,
        }
    }

    /// AWS proper supports virtual-hosted buckets; everything else wants path-style.
    pub fn force_path_style(self) -> bool {
        !matches!(self, StorageProvider::S3)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub dpi: f32,
    /// Explicit location of the pdfium shared library
    pub pdfium_library_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Base URL for public object links, without a trailing slash
    pub fn public_base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bucket),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                static_dir: PathBuf::from("static"),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            storage: StorageConfig {
                provider: StorageProvider::Minio,
                endpoint: "http://localhost:9000".to_string(),
                bucket: "pdf-images".to_string(),
                access_key: "minioadmin".to_string(),
                secret_key: "minioadmin".to_string(),
                region: Some("us-east-1".to_string()),
                public_url: None,
                key_prefix: "pdf".to_string(),
            },
            render: RenderConfig {
                dpi: DEFAULT_RENDER_DPI,
                pdfium_library_path: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
                static_dir: env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("static")),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
            storage: StorageConfig {
                provider: StorageProvider::from_name(
                    &env::var("S3_PROVIDER").unwrap_or_else(|_| "minio".to_string()),
                ),
                endpoint: env::var("S3_ENDPOINT")?,
                bucket: env::var("S3_BUCKET")?,
                access_key: env::var("S3_ACCESS_KEY")?,
                secret_key: env::var("S3_SECRET_KEY")?,
                region: env::var("S3_REGION").ok(),
                public_url: env::var("S3_PUBLIC_URL").ok(),
                key_prefix: env::var("S3_KEY_PREFIX").unwrap_or_else(|_| "pdf".to_string()),
            },
            render: RenderConfig {
                dpi: env::var("RENDER_DPI")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|dpi: &f32| *dpi > 0.0)
                    .unwrap_or(DEFAULT_RENDER_DPI),
                pdfium_library_path: env::var("PDFIUM_LIBRARY_PATH").ok().map(PathBuf::from),
            },
        })
    }
}
