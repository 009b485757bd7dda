use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateShortUrlRequest {
    pub long_url: String,
    #[serde(default)]
    pub user_id: String,
    pub custom_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShortUrlResponse {
    pub message: String,
    pub short_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    pub short_url: String,
    pub long_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveUrlRequest {
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
