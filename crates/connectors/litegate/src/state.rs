//! Transient state used by the connector.
//!
//! This is initialized on startup.

use std::sync::Arc;

use thiserror::Error;

use litegate_configuration::Configuration;
use query_engine_execution::database::ConnectionFactory;
use query_engine_execution::metrics;

/// State for our connector.
#[derive(Clone)]
pub struct ServerState {
    pub configuration: Arc<Configuration>,
    pub factory: Arc<ConnectionFactory>,
    pub metrics: metrics::Metrics,
    pub metrics_registry: Arc<prometheus::Registry>,
}

/// Wrap the runtime configuration and a connection factory into server state.
pub fn create_state(configuration: Configuration) -> Result<ServerState, InitializationError> {
    let mut metrics_registry = prometheus::Registry::new();
    let metrics = metrics::Metrics::initialize(&mut metrics_registry)
        .map_err(InitializationError::MetricsError)?;

    let factory = ConnectionFactory::new(
        &configuration.connection.directory,
        configuration.connection.create_if_missing,
    );

    Ok(ServerState {
        configuration: Arc::new(configuration),
        factory: Arc::new(factory),
        metrics,
        metrics_registry: Arc::new(metrics_registry),
    })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
