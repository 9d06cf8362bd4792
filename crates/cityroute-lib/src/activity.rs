//! Activity notifications emitted after successful route searches.
//!
//! The route facade hands an [`ActivityRecord`] to an [`ActivitySink`] once a
//! route has been found for an identified caller. Sinks are best-effort: the
//! facade logs and discards any error they return.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::routing::RouteResult;

/// Action name recorded for route searches.
pub const SEARCH_ROUTE_ACTION: &str = "search_route";

/// Environment variable naming a JSON-lines history file.
pub const HISTORY_PATH_ENV: &str = "CITYROUTE_HISTORY_PATH";

/// Sink configured by the environment: a [`JsonLinesActivitySink`] when
/// `CITYROUTE_HISTORY_PATH` is set, otherwise a [`TracingActivitySink`].
pub fn sink_from_env() -> Result<Arc<dyn ActivitySink>> {
    match env::var_os(HISTORY_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(Arc::new(JsonLinesActivitySink::open(path)?)),
        _ => Ok(Arc::new(TracingActivitySink)),
    }
}

/// One entry in a caller's activity history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub identity: String,
    pub action: String,
    pub metadata: Value,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    /// Build the record describing a successful route search.
    pub fn route_search(identity: impl Into<String>, result: &RouteResult) -> Self {
        Self {
            identity: identity.into(),
            action: SEARCH_ROUTE_ACTION.to_string(),
            metadata: json!({
                "from": result.from,
                "to": result.to,
                "distance": result.distance_km,
                "algorithm": result.algorithm.to_string(),
            }),
            timestamp: Utc::now(),
        }
    }
}

/// Destination for activity records.
pub trait ActivitySink: Send + Sync {
    fn record(&self, record: ActivityRecord) -> Result<()>;
}

/// Emits each record as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActivitySink;

impl ActivitySink for TracingActivitySink {
    fn record(&self, record: ActivityRecord) -> Result<()> {
        info!(
            identity = %record.identity,
            action = %record.action,
            metadata = %record.metadata,
            timestamp = %record.timestamp.to_rfc3339(),
            "activity recorded"
        );
        Ok(())
    }
}

/// Appends records to a file, one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesActivitySink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesActivitySink {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActivitySink for JsonLinesActivitySink {
    fn record(&self, record: ActivityRecord) -> Result<()> {
        let line = serde_json::to_string(&record)?;
        let mut file = self.file.lock().map_err(|_| Error::ActivitySink {
            message: format!("history file lock poisoned for {}", self.path.display()),
        })?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Keeps records in memory; useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryActivitySink {
    records: Mutex<Vec<ActivityRecord>>,
    reject: bool,
}

impl MemoryActivitySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every record.
    pub fn rejecting() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    /// Snapshot of the records accepted so far.
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ActivitySink for MemoryActivitySink {
    fn record(&self, record: ActivityRecord) -> Result<()> {
        if self.reject {
            return Err(Error::ActivitySink {
                message: "sink is rejecting records".to_string(),
            });
        }
        self.records
            .lock()
            .map_err(|_| Error::ActivitySink {
                message: "memory sink lock poisoned".to_string(),
            })?
            .push(record);
        Ok(())
    }
}
