use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PofinError {
    #[error("Config directory not found at {0}. Run 'pofin init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data file not found: {0}. Run 'pofin fetch' or point [data] file at an export.")]
    DataFileNotFound(PathBuf),

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Project '{0}' not found in dataset")]
    ProjectNotFound(String),

    #[error("Vendor '{0}' not found in dataset")]
    VendorNotFound(String),

    #[error("Purchase order '{0}' not found in dataset")]
    PurchaseOrderNotFound(String),

    #[error("No data URL configured. Set [data] url in config.toml or pass --url.")]
    NoDataUrl,

    #[error("Failed to fetch dataset from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PofinError>;
