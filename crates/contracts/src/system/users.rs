use super::auth::PermissionFlags;
use crate::domain::a001_store::StoreId;
use crate::domain::common::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// User (usuario) identifier
    UserId
);

/// Entry of `/api/usuario/listar/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "es_superusuario", default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    #[serde(rename = "es_superusuario")]
    pub is_superuser: bool,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("El nombre de usuario es obligatorio");
        }
        if self.password.is_empty() {
            return Err("La contraseña es obligatoria");
        }
        Ok(())
    }
}

/// Change of the signed-in user's own password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.old_password.is_empty() || self.new_password.is_empty() {
            return Err("Ingrese la contraseña actual y la nueva");
        }
        Ok(())
    }
}

/// Password set by a superuser for another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordDto {
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCreateDto {
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    #[serde(rename = "tienda_id")]
    pub store_id: StoreId,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_list_entry() {
        let users: Vec<User> = serde_json::from_str(
            r#"[{"id": 1, "username": "admin", "es_superusuario": true},
                {"id": 2, "username": "ana", "email": "ana@example.com"}]"#,
        )
        .unwrap();
        assert!(users[0].is_superuser);
        assert_eq!(users[1].id, UserId(2));
        assert!(!users[1].is_superuser);
    }

    #[test]
    fn test_create_user_validation() {
        let mut dto = CreateUserDto {
            username: "  ".to_string(),
            password: "secreto".to_string(),
            is_superuser: false,
        };
        assert!(dto.validate().is_err());
        dto.username = "ana".to_string();
        assert!(dto.validate().is_ok());
        dto.password.clear();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_change_password_requires_both() {
        let dto = ChangePasswordDto {
            old_password: String::new(),
            new_password: "nueva".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_permission_create_body() {
        let dto = PermissionCreateDto {
            user_id: UserId(3),
            store_id: StoreId(2),
            flags: PermissionFlags::all(),
        };
        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(body["usuario_id"], json!(3));
        assert_eq!(body["tienda_id"], json!(2));
        assert_eq!(body["puede_ver_inventario_compras"], json!(true));
        assert_eq!(body["puede_gestionar_proveedores"], json!(true));
    }
}
