use std::io::ErrorKind;

use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /
/// Serves the configured HTML entry point unmodified.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<Vec<u8>>, AppError> {
    let path = &state.config.index_file;
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Html(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Entry document {} not found",
            path.display()
        ))),
        Err(e) => Err(e.into()),
    }
}
