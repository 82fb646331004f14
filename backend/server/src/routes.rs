use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State as AxumState},
    response::Html,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::AppError,
    filter::{Choice, FilterState},
    state::State,
    view::DirectoryView,
};

pub const EMPTY_NOTE: &str = "No verified colleges found in the database.";

#[derive(Deserialize, Default, Debug)]
pub struct PageQuery {
    search: Option<String>,
    district: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    ownership: Option<String>,
}

impl From<PageQuery> for FilterState {
    fn from(query: PageQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            district: Choice::parse(query.district.as_deref()),
            kind: Choice::parse(query.kind.as_deref()),
            ownership: Choice::parse(query.ownership.as_deref()),
        }
    }
}

pub async fn colleges_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Value>, AppError> {
    let diagnostics = state.config.diagnostics;

    let colleges = state
        .store
        .fetch_verified_colleges()
        .await
        .map_err(|e| AppError::from_fetch(e, diagnostics))?;

    let count = colleges.len();
    let mut payload = json!({
        "success": true,
        "data": colleges,
        "count": count,
    });

    if count == 0 && diagnostics {
        payload["note"] = json!(EMPTY_NOTE);
    }

    Ok(Json(payload))
}

pub async fn page_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let mut view = DirectoryView::new(query.into());
    view.activate(state.page_source.as_ref()).await;

    Ok(Html(state.templates.page(&view)?))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
