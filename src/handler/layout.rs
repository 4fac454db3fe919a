use crate::app::AppState;
use crate::domain::{AnnotatedArticle, Article};
use crate::error::LayoutError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct AssignLayoutsRequest {
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignLayoutsResponse {
    pub jigsaw_articles: Vec<AnnotatedArticle>,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl IntoResponse for LayoutError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LayoutError::MissingArticles | LayoutError::InvalidArticleData { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            LayoutError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error assigning layouts".to_string(),
            ),
        };
        (status, Json(ErrorMessage { message })).into_response()
    }
}

/// Handler for POST /assign-layouts/{user_id}
pub async fn assign_layouts_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: String,
) -> Response {
    assign(&state, Some(&user_id), &body).await
}

/// Handler for POST /assign-layouts (anonymous feed)
pub async fn assign_anonymous_layouts_handler(
    State(state): State<AppState>,
    body: String,
) -> Response {
    info!("anon layout");
    assign(&state, None, &body).await
}

async fn assign(state: &AppState, user_id: Option<&str>, body: &str) -> Response {
    // An empty body carries no articles at all.
    let request = if body.trim().is_empty() {
        AssignLayoutsRequest::default()
    } else {
        match serde_json::from_str::<AssignLayoutsRequest>(body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse assign-layouts body: {e}");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorMessage {
                        message: format!("Invalid request body: {e}"),
                    }),
                )
                    .into_response();
            }
        }
    };

    match state.assigner().assign(user_id, request.articles).await {
        Ok(jigsaw_articles) => (
            StatusCode::OK,
            Json(AssignLayoutsResponse { jigsaw_articles }),
        )
            .into_response(),
        Err(e) => {
            match &e {
                LayoutError::Internal(_) => error!("Error assigning layouts: {e}"),
                _ => warn!("Rejected assign-layouts request: {e}"),
            }
            e.into_response()
        }
    }
}
