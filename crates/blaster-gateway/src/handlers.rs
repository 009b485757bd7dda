use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use blaster_core::{validate_long_url, ShortCode};
use blaster_shortener::ShortenParams;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::model::{
    CreateShortUrlRequest, CreateShortUrlResponse, MessageResponse, RemoveUrlRequest,
    UpdateUrlRequest,
};
use crate::state::AppState;

pub async fn index_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("This is the URL Blaster!"))
}

pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<Json<CreateShortUrlResponse>> {
    let Json(request) = payload?;

    validate_long_url(&request.long_url)?;
    if request.user_id.is_empty() {
        return Err(AppError::BadRequest(
            "Please input a valid user id!".to_string(),
        ));
    }

    let mut params = ShortenParams::new(request.long_url, request.user_id);
    if let Some(custom) = request.custom_code {
        params = params.with_custom_code(ShortCode::new(custom)?);
    }

    let code = state.shortener().shorten(params).await?;
    Ok(Json(CreateShortUrlResponse {
        message: "short url created successfully".to_string(),
        short_url: code.to_url(state.base_url()),
    }))
}

pub async fn update_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpdateUrlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    let code = ShortCode::new(request.short_url)?;

    state.shortener().update(&code, &request.long_url).await?;
    Ok(Json(MessageResponse::new("short url updated successfully")))
}

pub async fn remove_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RemoveUrlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    let code = ShortCode::new(request.short_url)?;

    state.shortener().remove(&code).await?;
    Ok(Json(MessageResponse::new("short url removed successfully")))
}

pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(short_url)?;
    let long_url = state.shortener().resolve(&code).await?;

    debug!(code = %code, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}
