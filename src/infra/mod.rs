// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting concerns that are not part of the model:
//
//   config_store.rs: model hyperparameters to / from JSON
//   logging.rs     : tracing subscriber setup

/// HybridClassifierConfig persistence
pub mod config_store;

/// tracing-subscriber installation
pub mod logging;
