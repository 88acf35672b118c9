use std::fs;
use std::path::Path;
use std::time::Duration;

use ureq::Agent;

use crate::error::{PofinError, Result};
use crate::model::Dataset;

/// Load the dataset JSON export from disk.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(PofinError::DataFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PofinError::DataParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Download the dataset export from the back office and write it to the
/// local data file. The body is validated as a dataset before anything is
/// written, so a bad response never clobbers a good local copy.
pub fn fetch_dataset(url: &str, dest: &Path) -> Result<Dataset> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(10)))
        .build()
        .into();

    let body: String = agent
        .get(url)
        .call()
        .map_err(|e| PofinError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .body_mut()
        .read_to_string()
        .map_err(|e| PofinError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let dataset: Dataset = serde_json::from_str(&body).map_err(|e| PofinError::Fetch {
        url: url.to_string(),
        reason: format!("response is not a valid dataset: {e}"),
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, body)?;

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_file_is_a_distinct_error() {
        let err = load_dataset(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, PofinError::DataFileNotFound(_)));
    }

    #[test]
    fn sample_data_template_parses() {
        let data: Dataset = serde_json::from_str(crate::config::SAMPLE_DATA).unwrap();
        assert_eq!(data.projects.len(), 2);
        assert_eq!(data.vendors.len(), 3);
        assert_eq!(data.purchase_orders.len(), 3);
        assert_eq!(data.invoice_count(), 4);
    }
}
