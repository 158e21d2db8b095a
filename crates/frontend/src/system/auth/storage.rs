use contracts::system::auth::UserInfo;
use web_sys::window;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "me";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save session token to localStorage
pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

/// Get session token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// Save the signed-in user as JSON
pub fn save_user(user: &UserInfo) {
    let Ok(json) = serde_json::to_string(user) else {
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(USER_KEY, &json);
    }
}

/// Stored user; an unreadable entry counts as absent
pub fn get_user() -> Option<UserInfo> {
    let json = get_local_storage()?.get_item(USER_KEY).ok()??;
    match serde_json::from_str(&json) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("stored user ignored: {}", e);
            None
        }
    }
}

/// Clear token and user
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
