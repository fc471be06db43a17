use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by `GET /auth/me` and login.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Role as the server sent it. Admin detection is case-insensitive and
    /// only ever matches string roles; any other JSON shape is non-admin.
    #[serde(default)]
    pub role: serde_json::Value,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub banned_reason: Option<String>,
}

impl User {
    /// `true` iff `role` is a string that uppercases to `"ADMIN"`.
    pub fn is_admin(&self) -> bool {
        self.role
            .as_str()
            .map(|r| r.to_uppercase() == "ADMIN")
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cf_token: Option<String>,
}

/// Login response. The token, when present, is held in session storage and
/// attached as a bearer header on subsequent requests.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cf_token: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
