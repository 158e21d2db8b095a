use crate::domain::a001_store::StoreId;
use crate::domain::common::numeric_id;
use serde::{Deserialize, Deserializer, Serialize};

numeric_id!(
    /// Permission record identifier
    PermissionId
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `/api/usuario/login/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(rename = "permisos", default)]
    pub permissions: Option<Vec<Permission>>,
    #[serde(rename = "es_superusuario", default)]
    pub is_superuser: bool,
}

/// Per-store permission record attached to a user.
///
/// Fields the console does not know are kept as received, so a record sent
/// back on update loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PermissionId>,
    /// `None` for a global permission
    #[serde(rename = "tienda", default)]
    pub store: Option<StoreId>,
    #[serde(flatten)]
    pub flags: PermissionFlags,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The grants a permission record carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlags {
    #[serde(rename = "puede_gestionar_proveedores", default)]
    pub manage_suppliers: bool,
    #[serde(rename = "puede_gestionar_productos", default)]
    pub manage_products: bool,
    #[serde(rename = "puede_gestionar_compras", default)]
    pub manage_purchases: bool,
    #[serde(rename = "puede_editar_compras", default)]
    pub edit_purchases: bool,
    #[serde(rename = "puede_ver_inventario_compras", default)]
    pub view_inventory: bool,
}

impl PermissionFlags {
    /// Everything granted; the default for a new permission
    pub fn all() -> Self {
        let mut flags = Self::default();
        for flag in PermissionFlag::ALL {
            flags.set(flag, true);
        }
        flags
    }

    pub fn get(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::ManageSuppliers => self.manage_suppliers,
            PermissionFlag::ManageProducts => self.manage_products,
            PermissionFlag::ManagePurchases => self.manage_purchases,
            PermissionFlag::EditPurchases => self.edit_purchases,
            PermissionFlag::ViewInventory => self.view_inventory,
        }
    }

    pub fn set(&mut self, flag: PermissionFlag, value: bool) {
        let slot = match flag {
            PermissionFlag::ManageSuppliers => &mut self.manage_suppliers,
            PermissionFlag::ManageProducts => &mut self.manage_products,
            PermissionFlag::ManagePurchases => &mut self.manage_purchases,
            PermissionFlag::EditPurchases => &mut self.edit_purchases,
            PermissionFlag::ViewInventory => &mut self.view_inventory,
        };
        *slot = value;
    }

    /// Labels of the granted flags, in display order
    pub fn granted_labels(&self) -> Vec<&'static str> {
        PermissionFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag))
            .map(PermissionFlag::label)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionFlag {
    ManageSuppliers,
    ManageProducts,
    ManagePurchases,
    EditPurchases,
    ViewInventory,
}

impl PermissionFlag {
    pub const ALL: [PermissionFlag; 5] = [
        PermissionFlag::ManageSuppliers,
        PermissionFlag::ManageProducts,
        PermissionFlag::ManagePurchases,
        PermissionFlag::EditPurchases,
        PermissionFlag::ViewInventory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PermissionFlag::ManageSuppliers => "Gestionar proveedores",
            PermissionFlag::ManageProducts => "Gestionar productos",
            PermissionFlag::ManagePurchases => "Gestionar compras",
            PermissionFlag::EditPurchases => "Editar compras",
            PermissionFlag::ViewInventory => "Ver inventario",
        }
    }
}

impl Permission {
    /// Copy of this record with one flag flipped, as sent on update
    pub fn toggled(&self, flag: PermissionFlag) -> Self {
        let mut next = self.clone();
        next.flags.set(flag, !self.flags.get(flag));
        next
    }
}

/// Signed-in user as kept in browser storage (`me`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "permisos", default, deserialize_with = "null_as_empty")]
    pub permissions: Vec<Permission>,
    #[serde(rename = "es_superusuario", default)]
    pub is_superuser: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Permission>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Permission>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&LoginResponse> for UserInfo {
    fn from(response: &LoginResponse) -> Self {
        Self {
            id: response.id,
            username: response.username.clone(),
            permissions: response.permissions.clone().unwrap_or_default(),
            is_superuser: response.is_superuser,
        }
    }
}

impl UserInfo {
    /// Inventory columns of the purchases matrix are visible to superusers
    /// and to anyone holding a permission that grants them
    pub fn can_view_inventory(&self) -> bool {
        self.is_superuser
            || self
                .permissions
                .iter()
                .any(|p| p.flags.view_inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_to_user() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token": "abc", "id": 2, "username": "ana",
                "permisos": [{"id": 1, "puede_ver_inventario_compras": true}]}"#,
        )
        .unwrap();

        let user = UserInfo::from(&response);

        assert_eq!(user.username, "ana");
        assert!(!user.is_superuser);
        assert!(user.can_view_inventory());
        assert_eq!(user.permissions[0].id, Some(PermissionId(1)));
        assert_eq!(user.permissions[0].store, None);
    }

    #[test]
    fn test_toggle_keeps_unknown_fields() {
        let permission: Permission = serde_json::from_str(
            r#"{"id": 7, "usuario": 3, "tienda": 2,
                "puede_gestionar_compras": true, "puede_ver_inventario_compras": false}"#,
        )
        .unwrap();
        assert_eq!(permission.store, Some(StoreId(2)));
        assert_eq!(permission.flags.granted_labels(), vec!["Gestionar compras"]);

        let toggled = permission.toggled(PermissionFlag::ViewInventory);
        assert!(toggled.flags.view_inventory);
        assert!(!permission.flags.view_inventory);

        let body = serde_json::to_value(&toggled).unwrap();
        assert_eq!(body["usuario"], serde_json::json!(3));
        assert_eq!(body["tienda"], serde_json::json!(2));
        assert_eq!(body["puede_ver_inventario_compras"], serde_json::json!(true));
        assert_eq!(body["puede_editar_compras"], serde_json::json!(false));
    }

    #[test]
    fn test_all_flags_granted() {
        let flags = PermissionFlags::all();
        assert!(PermissionFlag::ALL.into_iter().all(|flag| flags.get(flag)));
        assert_eq!(flags.granted_labels().len(), 5);
    }

    #[test]
    fn test_stored_user_with_null_permissions() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id": null, "username": "root", "permisos": null, "es_superusuario": true}"#)
                .unwrap();
        assert!(user.permissions.is_empty());
        assert!(user.can_view_inventory());
    }

    #[test]
    fn test_inventory_visibility() {
        let mut user = UserInfo::default();
        assert!(!user.can_view_inventory());

        user.permissions.push(Permission::default());
        assert!(!user.can_view_inventory());

        user.is_superuser = true;
        assert!(user.can_view_inventory());
    }
}
