//! Success envelope: `{"data": ..., "message": ..., "status": "success"}`

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    pub status: &'static str,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: "success",
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with `"data": null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::success((), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_data_serializes_as_null() {
        let body = serde_json::to_value(ApiResponse::message("done")).unwrap();
        assert!(body["data"].is_null());
        assert_eq!(body["status"], "success");
    }
}
