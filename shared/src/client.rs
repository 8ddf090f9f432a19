//! Auth API DTOs shared between the auth service and the portal client
//!
//! Field names follow the service's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

/// User information as issued by the auth service
///
/// `role` stays a plain string here; it is checked against the role catalog
/// when converted into [`crate::models::User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub role: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_wire_format() {
        let json = r#"{
            "accessToken": "at-1",
            "user": {"id": "u1", "role": "manager", "name": "Dana", "email": "dana@corp.example"}
        }"#;
        let parsed: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "at-1");
        assert!(parsed.refresh_token.is_none());
        assert_eq!(parsed.user.role, "manager");
        assert_eq!(parsed.user.department, "");
    }
}
