use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils;

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    api_utils::post_json("/api/usuario/login/", &request).await
}

/// Revoke the current session token on the server
pub async fn logout() -> Result<(), String> {
    api_utils::post("/api/usuario/logout/", &serde_json::json!({})).await
}
