use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Envelope returned by every endpoint. The embedded `statusCode` always
/// mirrors the HTTP status of the response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub response_object: Option<T>,
    pub status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, status: StatusCode) -> Self {
        Self {
            success: true,
            message: message.into(),
            response_object: Some(data),
            status_code: status.as_u16(),
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(message, data, StatusCode::OK)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success(message, data, StatusCode::CREATED)
    }

    pub fn failure(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            success: false,
            message: message.into(),
            response_object: None,
            status_code: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_camel_case_keys() {
        let body = ApiResponse::ok("Encounter found", 7);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Encounter found");
        assert_eq!(json["responseObject"], 7);
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn failure_carries_null_payload() {
        let body = ApiResponse::<()>::failure("Not found", StatusCode::NOT_FOUND);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["responseObject"], serde_json::Value::Null);
        assert_eq!(json["statusCode"], 404);
    }

    #[test]
    fn http_status_matches_embedded_code() {
        let response = ApiResponse::created("Branch Created", "b").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
