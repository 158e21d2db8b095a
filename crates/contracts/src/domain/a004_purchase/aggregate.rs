use super::line_item::{LineItem, LineItemId, LineItemPatch};
use crate::domain::a002_supplier::SupplierId;
use crate::domain::common::{numeric_id, AggregateRoot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Purchase (compra) identifier
    PurchaseId
);

/// Date portion of a purchase date: `"2024-11-08T00:00:00"` -> `"2024-11-08"`
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Purchase (compra): one purchasing event from a supplier on a date.
///
/// Line items (`detalles`) are embedded; the backend seeds one zero-quantity
/// line item per supplier product when the purchase is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,

    #[serde(rename = "proveedor")]
    pub supplier_id: SupplierId,

    /// `YYYY-MM-DD`, possibly with a time suffix
    #[serde(rename = "fecha_compra")]
    pub purchase_date: String,

    #[serde(rename = "detalles", default)]
    pub line_items: Vec<LineItem>,
}

impl Purchase {
    pub fn date(&self) -> &str {
        date_part(&self.purchase_date)
    }

    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    /// Apply a partial update to the embedded line item, if this purchase owns it
    pub fn patch_line_item(&mut self, id: LineItemId, patch: &LineItemPatch) -> bool {
        match self.line_items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                patch.apply_to(item);
                true
            }
            None => false,
        }
    }
}

impl AggregateRoot for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn description(&self) -> &str {
        self.date()
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "purchase"
    }

    fn element_name() -> &'static str {
        "Compra"
    }

    fn list_name() -> &'static str {
        "Compras"
    }
}

/// `CompraIn`: creates an empty purchase shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCreateDto {
    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,

    #[serde(rename = "fecha_compra")]
    pub purchase_date: String,
}

impl PurchaseCreateDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.purchase_date.trim().is_empty() {
            return Err("La fecha de compra es obligatoria");
        }
        NaiveDate::parse_from_str(self.purchase_date.trim(), "%Y-%m-%d")
            .map_err(|_| "La fecha de compra debe tener formato AAAA-MM-DD")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_product::ProductId;
    use crate::shared::numeric::LooseInt;

    #[test]
    fn test_purchase_wire_format() {
        let json = r#"{
            "id": 1,
            "proveedor": 4,
            "fecha_compra": "2024-11-08T00:00:00",
            "detalles": [
                {"id": 10, "compra": 1, "producto": 5, "producto_nombre": "Leche",
                 "cantidad": 3, "inventario_anterior": "?"}
            ]
        }"#;
        let purchase: Purchase = serde_json::from_str(json).unwrap();
        assert_eq!(purchase.date(), "2024-11-08");
        assert_eq!(purchase.line_items.len(), 1);
        assert_eq!(purchase.line_items[0].product_id, Some(ProductId(5)));
        assert_eq!(
            purchase.line_items[0].previous_inventory,
            Some(LooseInt::Text("?".to_string()))
        );
    }

    #[test]
    fn test_missing_line_items_default_to_empty() {
        let purchase: Purchase =
            serde_json::from_str(r#"{"id": 2, "proveedor": 4, "fecha_compra": "2024-01-01"}"#)
                .unwrap();
        assert!(purchase.line_items.is_empty());
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto = PurchaseCreateDto {
            supplier_id: SupplierId(1),
            purchase_date: "2024-02-30".to_string(),
        };
        assert!(dto.validate().is_err());
        dto.purchase_date = "2024-02-29".to_string();
        assert!(dto.validate().is_ok());
        dto.purchase_date = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2024-03-15"), "2024-03-15");
        assert_eq!(date_part("2024-03-15T14:02:26Z"), "2024-03-15");
    }
}
