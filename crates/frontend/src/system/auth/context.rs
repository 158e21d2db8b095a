use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl AuthState {
    /// Session kept in localStorage from a previous visit
    pub fn restore() -> Self {
        let token = storage::get_token();
        let user = token.as_ref().and_then(|_| storage::get_user());
        Self { token, user }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_superuser(&self) -> bool {
        self.user.as_ref().map(|u| u.is_superuser).unwrap_or(false)
    }

    pub fn can_view_inventory(&self) -> bool {
        self.user
            .as_ref()
            .map(UserInfo::can_view_inventory)
            .unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restore());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Store a successful login and switch the auth state
pub fn accept_login(response: LoginResponse, set_auth_state: WriteSignal<AuthState>) -> Result<(), String> {
    let token = response
        .token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| "El servidor no devolvió un token".to_string())?;
    let user = UserInfo::from(&response);

    storage::save_token(&token);
    storage::save_user(&user);
    log::info!("signed in as {}", user.username);

    set_auth_state.set(AuthState {
        token: Some(token),
        user: Some(user),
    });
    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        log::warn!("logout request failed: {}", e);
    }

    storage::clear_session();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::{Permission, PermissionFlags};

    #[test]
    fn test_guest_has_no_grants() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert!(!state.is_superuser());
        assert!(!state.can_view_inventory());
    }

    #[test]
    fn test_inventory_grant_from_permission() {
        let permission = Permission {
            flags: PermissionFlags {
                view_inventory: true,
                ..PermissionFlags::default()
            },
            ..Permission::default()
        };
        let state = AuthState {
            token: Some("t".to_string()),
            user: Some(UserInfo {
                username: "ana".to_string(),
                permissions: vec![permission],
                ..UserInfo::default()
            }),
        };
        assert!(state.can_view_inventory());
        assert!(!state.is_superuser());
    }
}
