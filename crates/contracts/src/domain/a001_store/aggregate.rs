use crate::domain::common::{numeric_id, AggregateRoot};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Store (tienda) identifier
    StoreId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Store (tienda) as returned by `/api/tienda/listar/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,

    #[serde(rename = "nombre")]
    pub name: String,
}

impl AggregateRoot for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "store"
    }

    fn element_name() -> &'static str {
        "Tienda"
    }

    fn list_name() -> &'static str {
        "Tiendas"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create and rename payload (`TiendaIn`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDto {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl StoreDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("El nombre de la tienda es obligatorio");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_wire_names() {
        let store: Store = serde_json::from_str(r#"{"id": 7, "nombre": "Centro"}"#).unwrap();
        assert_eq!(store.id, StoreId(7));
        assert_eq!(store.name, "Centro");

        let json = serde_json::to_value(StoreDto::new("Norte")).unwrap();
        assert_eq!(json, serde_json::json!({"nombre": "Norte"}));
    }

    #[test]
    fn test_store_dto_requires_name() {
        assert!(StoreDto::new("   ").validate().is_err());
        assert!(StoreDto::new("Sur").validate().is_ok());
    }

    #[test]
    fn test_store_page_id() {
        assert_eq!(Store::list_page_id(), "a001_store--list");
    }
}
