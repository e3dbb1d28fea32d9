use std::sync::Arc;

use crate::generation::generator::SnapshotGenerator;
use crate::generation::randomness::RandomSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the read-only template set loaded at startup.
    pub generator: SnapshotGenerator,
    pub random: Arc<RandomSource>,
}
