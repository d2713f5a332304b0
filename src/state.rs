use std::sync::Arc;

use crate::{
    db::MovieStore,
    services::{catalog::MovieCatalog, mood::MoodClassifier},
};

/// Shared application state
///
/// Holds the two external-service clients and the persistence store behind
/// trait objects so tests can swap in doubles. Everything here is immutable
/// after startup; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn MoodClassifier>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub store: Arc<dyn MovieStore>,
}
