use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration body. Fields are optional so missing ones produce a 400
/// instead of a body-rejection; handlers decide which are required based on
/// the configured identity field.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_omits_absent_role() {
        let json = serde_json::to_string(&PublicUser {
            id: Uuid::new_v4(),
            username: "alice".into(),
            role: None,
        })
        .unwrap();
        assert!(!json.contains("role"));

        let json = serde_json::to_string(&PublicUser {
            id: Uuid::new_v4(),
            username: "root".into(),
            role: Some("admin".into()),
        })
        .unwrap();
        assert!(json.contains("\"role\":\"admin\""));
    }
}
