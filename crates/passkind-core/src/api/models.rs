//! Wire models for the backend API.
//!
//! The backend serializes camelCase JSON; timestamps come back as local
//! date-times without an offset.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

/// A stored secret as the backend returns it. The plaintext value is
/// never part of this shape; it has its own endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Write payload for creating or updating a secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// One audit-history entry for a secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    #[serde(default)]
    pub modified_by: Option<String>,
    pub change_type: String,
    pub modified_at: NaiveDateTime,
    #[serde(default)]
    pub previous_data: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_parses_backend_shape() {
        let json = r#"{
            "id": 42,
            "name": "github",
            "username": "octocat",
            "tags": ["work"],
            "metadata": {"env": "prod"},
            "createdAt": "2024-03-01T09:30:00"
        }"#;
        let secret: Secret = serde_json::from_str(json).unwrap();
        assert_eq!(secret.id, 42);
        assert_eq!(secret.username.as_deref(), Some("octocat"));
        assert!(secret.email.is_none());
        assert!(secret.created_at.is_some());
        assert!(secret.updated_at.is_none());
    }

    #[test]
    fn secret_input_omits_absent_value() {
        let input = SecretInput {
            name: "github".into(),
            ..SecretInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["name"], "github");
    }

    #[test]
    fn auth_response_reads_camel_case_token() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"accessToken": "tok", "tokenType": "Bearer"}"#).unwrap();
        assert_eq!(resp.access_token, "tok");
    }
}
