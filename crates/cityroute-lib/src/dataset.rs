use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::CoordinateTable;
use crate::graph::SourceGraph;

/// Default filename for a user-supplied dataset.
const DATASET_FILENAME: &str = "cities.json";

/// Environment variable overriding the dataset location.
pub const DATA_PATH_ENV: &str = "CITYROUTE_DATA_PATH";

/// Dataset compiled into the library.
const EMBEDDED_DATASET: &str = include_str!("../data/cities.json");

/// Static reference data: the raw city graph, coordinates and the list of
/// cities offered to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub major_cities: Vec<String>,
    #[serde(default)]
    pub coordinates: CoordinateTable,
    pub graph: SourceGraph,
}

impl ReferenceData {
    /// The dataset shipped with the library.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path)?;
        let data = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            nodes = data.graph.len(),
            coordinates = data.coordinates.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        for (name, coordinate) in self.coordinates.iter() {
            let valid = coordinate.latitude.is_finite()
                && coordinate.longitude.is_finite()
                && (-90.0..=90.0).contains(&coordinate.latitude)
                && (-180.0..=180.0).contains(&coordinate.longitude);
            if !valid {
                return Err(Error::InvalidDataset {
                    message: format!("coordinate for '{name}' is out of range"),
                });
            }
        }
        Ok(())
    }
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "cityroute", "cityroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Load reference data.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided (must exist).
/// 2. `CITYROUTE_DATA_PATH` environment variable (must exist).
/// 3. `cities.json` in the platform data directory, if present.
/// 4. The embedded dataset.
///
/// A directory path is treated as containing `cities.json`.
pub fn load_reference_data(target: Option<&Path>) -> Result<ReferenceData> {
    if let Some(explicit) = target {
        return ReferenceData::from_path(&canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATA_PATH_ENV) {
        return ReferenceData::from_path(&canonical_dataset_path(Path::new(&env_path)));
    }

    if let Ok(default) = default_dataset_path() {
        if default.is_file() {
            info!(path = %default.display(), "using dataset from data directory");
            return ReferenceData::from_path(&default);
        }
    }

    debug!("using embedded dataset");
    ReferenceData::embedded()
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}
