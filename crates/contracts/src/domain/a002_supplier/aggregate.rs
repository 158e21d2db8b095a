use crate::domain::a001_store::StoreId;
use crate::domain::common::{numeric_id, AggregateRoot};
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Supplier (proveedor) identifier
    SupplierId
);

/// Supplier (proveedor); every supplier belongs to exactly one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "tienda")]
    pub store_id: StoreId,
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "supplier"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

/// `ProveedorIn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierCreateDto {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "tienda_id")]
    pub store_id: StoreId,
}

impl SupplierCreateDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("El nombre del proveedor es obligatorio");
        }
        Ok(())
    }
}

/// `ProveedorUpdate`: only the name is editable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierUpdateDto {
    #[serde(rename = "nombre")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_wire_names() {
        let supplier: Supplier =
            serde_json::from_str(r#"{"id": 3, "nombre": "Lácteos SA", "tienda": 1}"#).unwrap();
        assert_eq!(supplier.store_id, StoreId(1));

        let dto = SupplierCreateDto {
            name: "Panadería".to_string(),
            store_id: StoreId(1),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({"nombre": "Panadería", "tienda_id": 1})
        );
    }
}
