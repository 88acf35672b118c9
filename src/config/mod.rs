mod settings;

pub use settings::{Config, DataSettings, DisplaySettings};

use crate::error::{PofinError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.pofin/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "pofin") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.pofin/
    let home = dirs_home().ok_or_else(|| {
        PofinError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".pofin"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(PofinError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PofinError::ConfigParse { path, source: e })
}

/// Resolve the dataset path from config: absolute and ~ paths stand alone,
/// anything else is relative to the config directory.
pub fn resolve_data_file(config: &Config, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(&config.data.file);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[data]
# Dataset file. Relative paths resolve against this config directory.
file = "data.json"
# Export endpoint for 'pofin fetch', e.g. the back office dashboard export:
# url = "https://backoffice.example.com/api/dashboard/unified/export"

[display]
top_n = 5            # rows shown by 'vendors' and 'projects'
php_symbol = "PHP "
usd_symbol = "$"
"#;

/// Sample dataset written by 'pofin init' so every command works out of the
/// box. Same shape as the back office JSON export.
pub const SAMPLE_DATA: &str = r#"{
  "projects": [
    {
      "id": "prj-1",
      "title": "Warehouse Retrofit",
      "budget": 2000000,
      "contract_cost": 1850000,
      "kind": "capital",
      "status": "active"
    },
    {
      "id": "prj-2",
      "title": "Annual IT Support",
      "budget": 600000,
      "contract_cost": 580000,
      "kind": "operational",
      "status": "active"
    }
  ],
  "vendors": [
    {"id": "ven-1", "name": "Acme Builders", "category": "construction", "active": true},
    {"id": "ven-2", "name": "Bolt Supply Co.", "category": "materials", "active": true},
    {"id": "ven-3", "name": "Globex IT Services", "category": "services", "active": true}
  ],
  "purchase_orders": [
    {
      "id": "po-1",
      "number": "PO-2026-0001",
      "project_id": "prj-1",
      "vendor_id": "ven-1",
      "amount": 1200000,
      "currency": "PHP",
      "status": "open",
      "order_date": "2026-01-05",
      "invoices": [
        {"id": "si-1", "number": "SI-2026-0001", "invoice_amount": 448000,
         "net_amount": 400000, "currency": "PHP", "status": "paid",
         "due_date": "2026-02-15"},
        {"id": "si-2", "number": "SI-2026-0002", "invoice_amount": 336000,
         "net_amount": 300000, "currency": "PHP", "status": "pending",
         "due_date": "2026-03-10"}
      ]
    },
    {
      "id": "po-2",
      "number": "PO-2026-0002",
      "project_id": "prj-1",
      "vendor_id": "ven-2",
      "amount": 350000,
      "currency": "PHP",
      "status": "open",
      "order_date": "2026-01-20",
      "invoices": [
        {"id": "si-3", "number": "SI-2026-0003", "invoice_amount": 112000,
         "net_amount": 100000, "currency": "PHP", "status": "approved",
         "due_date": "2026-04-30"}
      ]
    },
    {
      "id": "po-3",
      "number": "PO-2026-0003",
      "project_id": "prj-2",
      "vendor_id": "ven-3",
      "amount": 8000,
      "currency": "USD",
      "status": "open",
      "order_date": "2026-02-01",
      "invoices": [
        {"id": "si-4", "number": "SI-2026-0004", "invoice_amount": 2240,
         "net_amount": 2000, "currency": "USD", "status": "submitted",
         "due_date": "2025-11-15"}
      ]
    }
  ]
}
"#;
