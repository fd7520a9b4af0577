//! The query endpoint: flat request parameters in, flat JSON document out.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::{Form, Json};

use query_engine_execution::response::QueryResponse;

use crate::state::ServerState;

/// `GET /query` with parameters in the URL query string.
pub async fn get_query(
    State(state): State<ServerState>,
    Query(parameters): Query<BTreeMap<String, String>>,
) -> Json<QueryResponse> {
    Json(crate::query::query(&state, &parameters).await)
}

/// `POST /query` with parameters in an urlencoded form body.
pub async fn post_query(
    State(state): State<ServerState>,
    Form(parameters): Form<BTreeMap<String, String>>,
) -> Json<QueryResponse> {
    Json(crate::query::query(&state, &parameters).await)
}
