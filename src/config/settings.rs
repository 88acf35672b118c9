use serde::{Deserialize, Serialize};

use crate::model::Currency;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub data: DataSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DataSettings {
    /// Dataset path; relative paths resolve against the config directory.
    pub file: String,
    /// Export endpoint used by 'pofin fetch'.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_php_symbol")]
    pub php_symbol: String,
    #[serde(default = "default_usd_symbol")]
    pub usd_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            php_symbol: default_php_symbol(),
            usd_symbol: default_usd_symbol(),
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_php_symbol() -> String {
    "PHP ".to_string()
}

fn default_usd_symbol() -> String {
    "$".to_string()
}

impl Config {
    pub fn symbol(&self, currency: Currency) -> &str {
        match currency {
            Currency::Php => &self.display.php_symbol,
            Currency::Usd => &self.display.usd_symbol,
        }
    }
}
