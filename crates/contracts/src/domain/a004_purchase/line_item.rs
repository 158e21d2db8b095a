use super::aggregate::PurchaseId;
use crate::domain::a003_product::ProductId;
use crate::domain::common::numeric_id;
use crate::shared::numeric::{coerce_previous_inventory, coerce_quantity, LooseInt};
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Line item (detalle de compra) identifier, unique across all purchases
    LineItemId
);

/// Line item (detalle): one product's figures within a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,

    #[serde(rename = "compra", default)]
    pub purchase_id: Option<PurchaseId>,

    #[serde(rename = "producto", default)]
    pub product_id: Option<ProductId>,

    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,

    #[serde(rename = "cantidad", default)]
    pub quantity: Option<LooseInt>,

    #[serde(rename = "inventario_anterior", default)]
    pub previous_inventory: Option<LooseInt>,
}

impl LineItem {
    /// Display label: the product name, else `"Producto {id}"`, else `"Producto unk"`
    pub fn product_label(&self) -> String {
        match (&self.product_name, self.product_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("Producto {}", id),
            (None, None) => "Producto unk".to_string(),
        }
    }

    pub fn quantity_value(&self) -> i64 {
        coerce_quantity(self.quantity.as_ref())
    }

    pub fn previous_inventory_value(&self) -> Option<i64> {
        coerce_previous_inventory(self.previous_inventory.as_ref())
    }
}

/// Body of `/api/compra/detalle/crear/{compra_id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemCreateDto {
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "inventario_anterior")]
    pub previous_inventory: i64,
}

impl LineItemCreateDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.quantity < 0 {
            return Err("La cantidad no puede ser negativa");
        }
        Ok(())
    }
}

/// Partial update (`DetalleCompraUpdate`). Absent fields are not sent, so
/// the backend leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPatch {
    #[serde(rename = "cantidad", default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(
        rename = "inventario_anterior",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_inventory: Option<i64>,
}

impl LineItemPatch {
    pub fn quantity(value: i64) -> Self {
        Self {
            quantity: Some(value),
            ..Self::default()
        }
    }

    pub fn previous_inventory(value: i64) -> Self {
        Self {
            previous_inventory: Some(value),
            ..Self::default()
        }
    }

    /// Overwrite the patched fields; values are absolute, never added to
    /// what the item already holds
    pub fn apply_to(&self, item: &mut LineItem) {
        if let Some(quantity) = self.quantity {
            item.quantity = Some(LooseInt::Int(quantity));
        }
        if let Some(previous) = self.previous_inventory {
            item.previous_inventory = Some(LooseInt::Int(previous));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Option<i64>, name: Option<&str>) -> LineItem {
        LineItem {
            id: LineItemId(1),
            purchase_id: Some(PurchaseId(1)),
            product_id: product_id.map(ProductId),
            product_name: name.map(String::from),
            quantity: None,
            previous_inventory: None,
        }
    }

    #[test]
    fn test_product_label_fallbacks() {
        assert_eq!(item(Some(4), Some("Pan")).product_label(), "Pan");
        assert_eq!(item(Some(4), None).product_label(), "Producto 4");
        assert_eq!(item(None, None).product_label(), "Producto unk");
    }

    #[test]
    fn test_patch_sends_single_field() {
        let json = serde_json::to_value(LineItemPatch::previous_inventory(15)).unwrap();
        assert_eq!(json, serde_json::json!({"inventario_anterior": 15}));

        let json = serde_json::to_value(LineItemPatch::quantity(0)).unwrap();
        assert_eq!(json, serde_json::json!({"cantidad": 0}));
    }

    #[test]
    fn test_patch_overwrites_absolute_value() {
        let mut line = item(Some(4), None);
        line.previous_inventory = Some(LooseInt::Int(20));
        line.quantity = Some(LooseInt::Int(2));

        LineItemPatch::previous_inventory(15).apply_to(&mut line);

        assert_eq!(line.previous_inventory_value(), Some(15));
        assert_eq!(line.quantity_value(), 2);
    }
}
