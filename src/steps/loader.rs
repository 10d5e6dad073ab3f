//! Filesystem loading for step catalogs
//!
//! A step file holds a top-level `steps` array. The format is picked from the
//! file extension: `.toml`, `.yaml`/`.yml` or `.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{CatalogError, StepCatalog, StepDefinition};

/// On-disk shape of a step file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsFile {
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Error)]
pub enum StepsFileError {
    #[error("failed to read steps file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported steps file extension for {path} (expected toml, yaml, yml or json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid step catalog in {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Load and validate a step catalog from `path`
pub fn load_steps_file(path: &Path) -> Result<StepCatalog, StepsFileError> {
    let content = fs::read_to_string(path).map_err(|source| StepsFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse_error = |message: String| StepsFileError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let file: StepsFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        }
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        _ => {
            return Err(StepsFileError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    debug!(path = %path.display(), count = file.steps.len(), "Parsed steps file");

    StepCatalog::new(file.steps).map_err(|source| StepsFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "steps.toml",
            r#"
[[steps]]
id = 0
title = "Intake"
description = "Collect papers"
icon = "upload"
required_docs = ["ID", "Will"]

[[steps]]
id = 1
title = "Done"
description = "All set"
final_step = true
"#,
        );

        let catalog = load_steps_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().required_docs, vec!["ID", "Will"]);
        assert!(catalog.get(1).unwrap().final_step);
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "steps.yml",
            "steps:\n  - id: 0\n    title: Start\n    description: Begin\n    estimated_time: 2 days\n  - id: 1\n    title: End\n    description: Finish\n    final_step: true\n",
        );

        let catalog = load_steps_file(&path).unwrap();
        assert_eq!(
            catalog.get(0).unwrap().estimated_time.as_deref(),
            Some("2 days")
        );
    }

    #[test]
    fn test_load_json_matches_builtin() {
        let dir = TempDir::new().unwrap();
        let builtin = StepCatalog::inheritance();
        let json = serde_json::to_string(&StepsFile {
            steps: builtin.steps().to_vec(),
        })
        .unwrap();
        let path = write(&dir, "steps.json", &json);

        assert_eq!(load_steps_file(&path).unwrap(), builtin);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "steps.txt", "steps = []");
        assert!(matches!(
            load_steps_file(&path),
            Err(StepsFileError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            load_steps_file(&path),
            Err(StepsFileError::Read { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "steps.json", "{ not json");
        assert!(matches!(
            load_steps_file(&path),
            Err(StepsFileError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_catalog_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "steps.toml",
            "[[steps]]\nid = 0\ntitle = \"Lonely\"\ndescription = \"\"\n",
        );
        match load_steps_file(&path) {
            Err(StepsFileError::Invalid { source, .. }) => {
                assert_eq!(source, CatalogError::MissingFinalStep);
            }
            other => panic!("expected invalid catalog, got {other:?}"),
        }
    }
}
