use serde::{Deserialize, Serialize};

/// Local wall-clock time without offset, e.g. `2024-01-01T12:00:00.123456`.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ConvertSuccessResponse {
    pub success: bool,
    pub uid: String,
    pub phone: String,
    pub timestamp: String,
}

impl ConvertSuccessResponse {
    pub fn new(uid: String, phone: String) -> Self {
        Self {
            success: true,
            uid,
            phone,
            timestamp: timestamp(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    pub timestamp: String,
}

impl FailureResponse {
    pub fn new(error: String, uid: Option<String>) -> Self {
        Self {
            success: false,
            error,
            uid,
            timestamp: timestamp(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_iso_without_offset() {
        let ts = timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.6f").is_ok());
        assert!(!ts.ends_with('Z'));
    }

    #[test]
    fn failure_without_uid_omits_field() {
        let body = serde_json::to_value(FailureResponse::new("x".into(), None)).unwrap();
        assert_eq!(body["success"], false);
        assert!(body.get("uid").is_none());
    }
}
