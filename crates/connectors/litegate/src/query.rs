//! Answer one named-query operation.

use std::collections::BTreeMap;

use tracing::{info_span, Instrument};

use query_engine_execution::query as execution;
use query_engine_execution::response::QueryResponse;
use query_engine_translation::translation;

use crate::state::ServerState;

/// Compile and run the operation described by the request parameters.
///
/// The caller-visible contract is uniform: any failure, wherever it arose,
/// becomes `success = false` plus a message; a successful batch reports
/// whatever its statements fetched.
pub async fn query(state: &ServerState, parameters: &BTreeMap<String, String>) -> QueryResponse {
    match run(state, parameters).await {
        Ok(response) => {
            state.metrics.query_total.inc();
            response
        }
        Err(message) => {
            state.metrics.query_errors_total.inc();
            QueryResponse::failure(message)
        }
    }
}

async fn run(
    state: &ServerState,
    parameters: &BTreeMap<String, String>,
) -> Result<QueryResponse, String> {
    // Compile the operation.
    let batch = async {
        translation::compile(
            &state.configuration.queries,
            state.configuration.on_missing_parameter,
            parameters,
        )
        .map_err(|err| {
            tracing::error!("{}", err);
            err.to_string()
        })
    }
    .instrument(info_span!("Compile operation"))
    .await?;

    // Execute the batch.
    execution::execute(&state.factory, &batch)
        .instrument(info_span!("Execute batch"))
        .await
        .map_err(|err| {
            tracing::error!("{}", err);
            err.to_string()
        })
}
