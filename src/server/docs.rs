use serde_json::{json, Value};

use crate::converter::{MAX_UID_LENGTH, MIN_UID_LENGTH};
use crate::SERVICE_VERSION;

pub fn index_document() -> Value {
    json!({
        "message": "UID to phone number conversion API",
        "version": SERVICE_VERSION,
        "endpoints": {
            "/convert": "POST - convert a uid to a phone number",
            "/convert/<uid>": "GET - convert the uid in the path to a phone number",
            "/health": "GET - health check",
            "/docs": "GET - API documentation",
            "/metrics": "GET - Prometheus metrics"
        },
        "usage": {
            "POST /convert": {
                "body": { "uid": "user uid" },
                "response": { "success": true, "phone": "phone number", "uid": "original uid" }
            }
        }
    })
}

pub fn api_document() -> Value {
    let uid_rule = format!(
        "uid must be {}-{} ASCII digits; surrounding whitespace is ignored",
        MIN_UID_LENGTH, MAX_UID_LENGTH
    );

    json!({
        "title": "UID to phone number conversion API",
        "version": SERVICE_VERSION,
        "description": "Deterministically converts a user uid into a phone-number-shaped string",
        "endpoints": {
            "POST /convert": {
                "description": "convert a uid to a phone number",
                "request_body": {
                    "uid": format!("string (required) - user uid, {}-{} digits", MIN_UID_LENGTH, MAX_UID_LENGTH)
                },
                "response": {
                    "success": "boolean - whether the conversion succeeded",
                    "uid": "string - the uid as received",
                    "phone": "string - the converted phone number (on success)",
                    "error": "string - failure reason (on failure)",
                    "timestamp": "string - local ISO-8601 timestamp"
                },
                "example_request": { "uid": "100000000" },
                "example_response": {
                    "success": true,
                    "uid": "100000000",
                    "phone": "13800138000",
                    "timestamp": "2024-01-01T12:00:00.000000"
                }
            },
            "GET /convert/<uid>": {
                "description": "convert the uid given as a path segment",
                "parameters": { "uid": "path parameter - user uid" },
                "response": "same as POST /convert"
            }
        },
        "error_codes": {
            "400": "invalid request or uid",
            "404": "endpoint not found",
            "500": "internal server error"
        },
        "notes": [
            uid_rule,
            "generated numbers are 11 digits, start with 1 and with a known carrier prefix",
            "conversion is hash based: the same uid always yields the same number"
        ]
    })
}
