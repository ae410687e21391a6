//! In-memory stand-in for the Etherpad administrative API.
//!
//! Serves `POST /api/{version}/{operation}` with a form-encoded body and
//! answers every request with HTTP 200 and a `{code, message, data}`
//! envelope, the way the real server does. State lives in a `Store` behind
//! an async `RwLock`.

pub mod store;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    routing::post,
    Form, Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use store::{Failure, Store};

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Option<Arc<str>>,
}

/// Router without API key enforcement.
pub fn app() -> Router {
    router(Arc::default(), None)
}

/// Router that rejects requests whose `apikey` parameter is not `api_key`.
pub fn app_with_api_key(api_key: &str) -> Router {
    router(Arc::default(), Some(api_key.into()))
}

/// Router over an existing store, so tests can inspect or seed state.
pub fn router(db: Db, api_key: Option<Arc<str>>) -> Router {
    Router::new()
        .route("/api/{version}/{operation}", post(dispatch))
        .with_state(AppState { db, api_key })
}

pub async fn run(listener: TcpListener, api_key: Option<String>) -> Result<(), std::io::Error> {
    let app = match api_key {
        Some(key) => app_with_api_key(&key),
        None => app(),
    };
    axum::serve(listener, app).await
}

fn envelope(code: i64, message: &str, data: Value) -> Json<Value> {
    Json(json!({ "code": code, "message": message, "data": data }))
}

async fn dispatch(
    State(state): State<AppState>,
    Path((version, operation)): Path<(String, String)>,
    Form(params): Form<HashMap<String, String>>,
) -> Json<Value> {
    if let Some(expected) = state.api_key.as_deref() {
        if params.get("apikey").map(String::as_str) != Some(expected) {
            tracing::debug!(%operation, "rejected request with wrong API key");
            return envelope(4, "no or wrong API Key", Value::Null);
        }
    }

    let outcome = state.db.write().await.call(&operation, &params);
    match outcome {
        Ok(data) => {
            tracing::debug!(%version, %operation, "ok");
            envelope(0, "ok", data)
        }
        Err(failure) => {
            tracing::debug!(%version, %operation, reason = failure.message(), "failed");
            envelope(failure.code(), failure.message(), Value::Null)
        }
    }
}
