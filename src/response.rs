use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Envelope shared by every endpoint; failures use the same shape from `AppError`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Creates a success response with data.
    /// Status code defaults to 200 OK.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Usage: `ApiResponse::success(data).with_status(StatusCode::CREATED)`
    pub fn with_status(self, status: StatusCode) -> ApiResponseWithStatus<T> {
        ApiResponseWithStatus {
            status,
            response: self,
        }
    }

    /// Shorthand for 201 Created response.
    pub fn created(self) -> ApiResponseWithStatus<T> {
        self.with_status(StatusCode::CREATED)
    }
}

#[derive(Serialize)]
pub struct EmptyData;

impl ApiResponse<EmptyData> {
    /// Creates a success response with just a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

pub struct ApiResponseWithStatus<T> {
    status: StatusCode,
    response: ApiResponse<T>,
}

impl<T> IntoResponse for ApiResponseWithStatus<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
