//! Application state for the HTTP service.
//!
//! Handlers reach the loaded reference data and routing graph through the
//! [`RouteService`] held here.

use std::path::Path;
use std::sync::Arc;

use cityroute_lib::{load_reference_data, Error as LibError, RouteService, RouteServiceConfig};

use crate::history::QueuedActivitySink;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load the city dataset.
    DatasetLoad(LibError),

    /// Failed to open the activity history.
    ActivitySink(LibError),

    /// The dataset loaded but contains no routable cities.
    EmptyGraph,
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetLoad(e) => write!(f, "failed to load city dataset: {}", e),
            Self::ActivitySink(e) => write!(f, "failed to open activity history: {}", e),
            Self::EmptyGraph => write!(f, "city dataset contains no routable cities"),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) | Self::ActivitySink(e) => Some(e),
            Self::EmptyGraph => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::DatasetLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; every clone shares the same route service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: RouteService,
}

impl AppState {
    /// Load the dataset and wire activity notifications through a queue.
    ///
    /// `data_path` follows the same resolution as the CLI: an explicit path,
    /// then `CITYROUTE_DATA_PATH`, then the platform data directory, then the
    /// embedded dataset. Must be called from within a Tokio runtime because
    /// the activity queue spawns its worker.
    pub fn load(data_path: Option<&Path>) -> Result<Self, AppStateError> {
        let data = load_reference_data(data_path)?;
        tracing::info!(
            nodes = data.graph.len(),
            major_cities = data.major_cities.len(),
            "city dataset loaded"
        );

        let sink = cityroute_lib::sink_from_env().map_err(AppStateError::ActivitySink)?;
        let service = RouteService::new(data, RouteServiceConfig::default())
            .with_activity_sink(Arc::new(QueuedActivitySink::spawn(sink)));

        if service.graph().is_empty() {
            return Err(AppStateError::EmptyGraph);
        }

        tracing::info!(
            nodes = service.graph().len(),
            heuristic_scale = service.heuristic_scale(),
            "route service ready"
        );
        Ok(Self::from_service(service))
    }

    /// Create application state from a pre-built service.
    pub fn from_service(service: RouteService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { service }),
        }
    }

    pub fn service(&self) -> &RouteService {
        &self.inner.service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.service.graph().len())
            .finish()
    }
}
