use crate::domain::a002_supplier::SupplierId;
use crate::domain::common::{numeric_id, AggregateRoot};
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Product (producto) identifier
    ProductId
);

/// Product (producto) sold by a single supplier.
///
/// The API lists products in their display order; `ProductMoveRequest`
/// shifts one product up or down within its supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "proveedor")]
    pub supplier_id: SupplierId,
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }
}

/// `ProductoIn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreateDto {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,
}

impl ProductCreateDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio");
        }
        Ok(())
    }
}

/// `ProductoUpdate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdateDto {
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    #[serde(rename = "arriba")]
    Up,
    #[serde(rename = "abajo")]
    Down,
}

/// Body of `/api/producto/mover/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMoveRequest {
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    #[serde(rename = "direccion")]
    pub direction: MoveDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_wire_format() {
        let request = ProductMoveRequest {
            product_id: ProductId(12),
            direction: MoveDirection::Down,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"producto_id": 12, "direccion": "abajo"})
        );
    }

    #[test]
    fn test_product_wire_names() {
        let product: Product =
            serde_json::from_str(r#"{"id": 10, "nombre": "Leche", "proveedor": 3}"#).unwrap();
        assert_eq!(product.id, ProductId(10));
        assert_eq!(product.supplier_id, SupplierId(3));
    }
}
