//! Request handlers for the `/v1` API
//!
//! Reads and deletes of a single cell look the spreadsheet up first, so an
//! unknown spreadsheet is 404 whatever the address. Cell writes validate the
//! address and body first: a malformed address or unknown data type is 422
//! even when the spreadsheet does not exist.

use std::convert::Infallible;
use std::time::Instant;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures_util::stream;
use serde::{Deserialize, Serialize};

use sheetapi_core::{CellAddress, CellData, Spreadsheet, Store, ViewRenderer};

use crate::error::ApiResult;

/// Shared state handed to every handler
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Spreadsheet and cell store
    pub store: Store,
    /// Renderer for the view endpoint
    pub renderer: ViewRenderer,
}

impl AppState {
    /// Create state over an existing store
    pub fn new(store: Store) -> Self {
        Self {
            store,
            renderer: ViewRenderer::new(),
        }
    }
}

/// Body of spreadsheet create/rename requests
#[derive(Debug, Deserialize)]
pub struct SpreadsheetBody {
    pub name: String,
}

/// Body of a cell write, e.g. `{"value": "x", "type": "literal"}`
#[derive(Debug, Deserialize)]
pub struct CellBody {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A cell as returned by the API
#[derive(Debug, Serialize)]
pub struct CellResource {
    /// Canonical address, e.g. "A1"
    pub name: String,
    pub data: CellData,
}

impl CellResource {
    fn new(addr: CellAddress, data: CellData) -> Self {
        Self {
            name: addr.to_a1_string(),
            data,
        }
    }
}

/// Build the API router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/spreadsheets",
            get(list_spreadsheets).post(create_spreadsheet),
        )
        .route(
            "/v1/spreadsheets/:id",
            get(get_spreadsheet)
                .put(rename_spreadsheet)
                .delete(delete_spreadsheet),
        )
        .route("/v1/spreadsheets/:id/cells", get(list_cells))
        .route(
            "/v1/spreadsheets/:id/cells/:addr",
            get(get_cell).put(set_cell).delete(delete_cell),
        )
        .route("/v1/spreadsheets/:id/view", get(view_spreadsheet))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "handled request"
    );
    response
}

// === Spreadsheets ===

async fn create_spreadsheet(
    State(state): State<AppState>,
    body: Result<Json<SpreadsheetBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Spreadsheet>)> {
    let Json(body) = body?;
    let sheet = state.store.create_spreadsheet(body.name);
    Ok((StatusCode::CREATED, Json(sheet)))
}

async fn list_spreadsheets(State(state): State<AppState>) -> Json<Vec<Spreadsheet>> {
    Json(state.store.spreadsheets())
}

async fn get_spreadsheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Spreadsheet>> {
    Ok(Json(state.store.spreadsheet(&id)?))
}

async fn rename_spreadsheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SpreadsheetBody>, JsonRejection>,
) -> ApiResult<Json<Spreadsheet>> {
    let Json(body) = body?;
    Ok(Json(state.store.rename_spreadsheet(&id, body.name)?))
}

async fn delete_spreadsheet(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.delete_spreadsheet(&id);
    StatusCode::OK
}

// === Cells ===

async fn list_cells(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<CellResource>>> {
    let cells = state
        .store
        .cells(&id)?
        .into_iter()
        .map(|(addr, data)| CellResource::new(addr, data))
        .collect();
    Ok(Json(cells))
}

async fn get_cell(
    State(state): State<AppState>,
    Path((id, addr)): Path<(String, String)>,
) -> ApiResult<Json<Option<CellResource>>> {
    let data = state.store.cell_a1(&id, &addr)?;
    let addr = CellAddress::parse(&addr)?;
    Ok(Json(data.map(|data| CellResource::new(addr, data))))
}

async fn set_cell(
    State(state): State<AppState>,
    Path((id, addr)): Path<(String, String)>,
    body: Result<Json<CellBody>, JsonRejection>,
) -> ApiResult<Json<CellResource>> {
    let addr = CellAddress::parse(&addr)?;
    let Json(body) = body?;
    let data = CellData::from_parts(&body.kind, body.value)?;

    state.store.set_cell(&id, addr, data.clone())?;
    Ok(Json(CellResource::new(addr, data)))
}

async fn delete_cell(
    State(state): State<AppState>,
    Path((id, addr)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.store.delete_cell_a1(&id, &addr)?;
    Ok(StatusCode::OK)
}

// === View ===

/// Streams the grid one line at a time from a snapshot of the cells
async fn view_spreadsheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let cells = state.store.snapshot(&id)?;
    let lines = state.renderer.into_lines(cells).map(Ok::<_, Infallible>);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream::iter(lines)),
    )
        .into_response())
}
