use contracts::system::auth::{Permission, PermissionId};
use contracts::system::users::{
    ChangePasswordDto, CreateUserDto, PermissionCreateDto, ResetPasswordDto, User, UserId,
};

use crate::shared::api_utils;

/// Fetch all users (superusers only)
pub async fn fetch_users() -> Result<Vec<User>, String> {
    api_utils::get_json("/api/usuario/listar/").await
}

/// Create new user
pub async fn create_user(dto: &CreateUserDto) -> Result<(), String> {
    api_utils::post("/api/usuario/crear/", dto).await
}

/// Delete user
pub async fn delete_user(id: UserId) -> Result<(), String> {
    api_utils::delete(&format!("/api/usuario/eliminar/{}/", id)).await
}

/// Change the signed-in user's password
pub async fn change_password(dto: &ChangePasswordDto) -> Result<(), String> {
    api_utils::put("/api/usuario/password/change/", dto).await
}

/// Set another user's password
pub async fn reset_password(id: UserId, dto: &ResetPasswordDto) -> Result<(), String> {
    api_utils::post(&format!("/api/usuario/password/reset/{}/", id), dto).await
}

pub async fn fetch_permissions(user_id: UserId) -> Result<Vec<Permission>, String> {
    api_utils::get_json(&format!("/api/usuario/permisos/usuario/{}/", user_id)).await
}

/// Replace a permission record; the whole record is sent back
pub async fn update_permission(id: PermissionId, permission: &Permission) -> Result<(), String> {
    api_utils::put(&format!("/api/usuario/permisos/actualizar/{}/", id), permission).await
}

pub async fn create_permission(dto: &PermissionCreateDto) -> Result<(), String> {
    api_utils::post("/api/usuario/permisos/crear/", dto).await
}

pub async fn delete_permission(id: PermissionId) -> Result<(), String> {
    api_utils::delete(&format!("/api/usuario/permisos/eliminar/{}/", id)).await
}
