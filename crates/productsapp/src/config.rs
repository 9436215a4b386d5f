//! # Configuration
//!
//! Configuration is managed by [`confique`], layered from (highest first):
//!
//! 1. **Command-line flags**: applied by the binary after loading.
//! 2. **Environment variables**: `PRODUCTS_BIND`, `PRODUCTS_DATA_FILE`, etc.
//! 3. **Config file**: `products.toml` in the working directory, or `--config <path>`.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `server.bind` | `PRODUCTS_BIND` | `127.0.0.1:3000` | Listen address |
//! | `server.static_dir` | `PRODUCTS_STATIC_DIR` | unset | Directory served for non-API GETs |
//! | `storage.data_file` | `PRODUCTS_DATA_FILE` | `products.json` | The collection document |
//! | `storage.create_if_missing` | `PRODUCTS_CREATE_IF_MISSING` | `false` | Write `[]` at startup if absent |
//! | `log.filter` | `PRODUCTS_LOG` | `info` | `tracing` filter; `RUST_LOG` wins when set |

use crate::error::{ProductsError, Result};
use confique::Config;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "products.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct ProductsConfig {
    #[config(nested)]
    pub server: ServerConfig,

    #[config(nested)]
    pub storage: StorageConfig,

    #[config(nested)]
    pub log: LogConfig,
}

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[config(env = "PRODUCTS_BIND", default = "127.0.0.1:3000")]
    pub bind: String,

    /// Static files served for GET paths outside the API.
    #[config(env = "PRODUCTS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path of the JSON document holding the collection.
    #[config(env = "PRODUCTS_DATA_FILE", default = "products.json")]
    pub data_file: PathBuf,

    /// Create an empty collection on startup when the document is absent.
    #[config(env = "PRODUCTS_CREATE_IF_MISSING", default = false)]
    pub create_if_missing: bool,
}

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[config(env = "PRODUCTS_LOG", default = "info")]
    pub filter: String,
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:3000".to_string(),
                static_dir: None,
            },
            storage: StorageConfig {
                data_file: PathBuf::from("products.json"),
                create_if_missing: false,
            },
            log: LogConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl ProductsConfig {
    /// Load from environment and a config file.
    ///
    /// An explicit `file` must exist. Without one, `products.toml` in the
    /// working directory is used if present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let path = match file {
            Some(path) if !path.exists() => {
                return Err(ProductsError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config = Self::builder().env().file(&path).load()?;
        Ok(config)
    }
}
