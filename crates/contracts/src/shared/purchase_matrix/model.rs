use crate::domain::a003_product::ProductId;
use crate::domain::a004_purchase::{date_part, LineItem, LineItemId, PurchaseId};
use std::fmt;

/// Row key of the matrix.
///
/// Line items without a product id get a synthetic key built from their label
/// and their own id, so they never merge with other rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Product(ProductId),
    Synthetic(String),
}

impl ProductKey {
    pub fn for_line_item(item: &LineItem) -> Self {
        match item.product_id {
            Some(id) => ProductKey::Product(id),
            None => ProductKey::Synthetic(format!("{}-{}", item.product_label(), item.id)),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKey::Product(id) => write!(f, "{}", id),
            ProductKey::Synthetic(key) => f.write_str(key),
        }
    }
}

/// One selected purchase, rendered as a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixColumn {
    pub purchase_id: PurchaseId,
    pub purchase_date: String,
}

impl MatrixColumn {
    /// Header text, `DD/MM`
    pub fn header(&self) -> String {
        format_column_date(&self.purchase_date)
    }
}

/// Figures of one product in one purchase.
///
/// A default cell (all `None`) means the product had no line item in that
/// purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixCell {
    pub quantity: Option<i64>,
    pub previous_inventory: Option<i64>,
    pub line_item_id: Option<LineItemId>,
}

impl MatrixCell {
    pub fn value(&self, field: EditField) -> Option<i64> {
        match field {
            EditField::Quantity => self.quantity,
            EditField::PreviousInventory => self.previous_inventory,
        }
    }

    pub(crate) fn set(&mut self, field: EditField, value: i64) {
        match field {
            EditField::Quantity => self.quantity = Some(value),
            EditField::PreviousInventory => self.previous_inventory = Some(value),
        }
    }

    pub(crate) fn clear(&mut self, field: EditField) {
        match field {
            EditField::Quantity => self.quantity = None,
            EditField::PreviousInventory => self.previous_inventory = None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub key: ProductKey,
    pub label: String,
    /// One cell per matrix column, same order as `InventoryMatrix::columns`
    pub cells: Vec<MatrixCell>,
}

impl MatrixRow {
    pub(crate) fn new(key: ProductKey, label: String, column_count: usize) -> Self {
        Self {
            key,
            label,
            cells: vec![MatrixCell::default(); column_count],
        }
    }

    pub fn cell(&self, column: usize) -> Option<&MatrixCell> {
        self.cells.get(column)
    }

    /// Suggested reorder quantity for `column`: the drop in previous inventory
    /// since the preceding purchase. Only shown when both figures are known
    /// and inventory went down.
    pub fn suggestion(&self, column: usize) -> Option<i64> {
        if column == 0 {
            return None;
        }
        let before = self.cells.get(column - 1)?.previous_inventory?;
        let now = self.cells.get(column)?.previous_inventory?;
        (before > now).then(|| before - now)
    }
}

/// Pivoted view: products as rows, the most recent purchases as columns
/// (oldest on the left)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryMatrix {
    pub columns: Vec<MatrixColumn>,
    pub rows: Vec<MatrixRow>,
}

impl InventoryMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn row(&self, key: &ProductKey) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| &row.key == key)
    }

    pub(crate) fn row_mut(&mut self, key: &ProductKey) -> Option<&mut MatrixRow> {
        self.rows.iter_mut().find(|row| &row.key == key)
    }

    pub fn cell(&self, key: &ProductKey, column: usize) -> Option<&MatrixCell> {
        self.row(key)?.cell(column)
    }
}

/// Editable figure of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Quantity,
    PreviousInventory,
}

impl EditField {
    /// Field name in the line-item PATCH body
    pub fn backend_field_name(&self) -> &'static str {
        match self {
            EditField::Quantity => "cantidad",
            EditField::PreviousInventory => "inventario_anterior",
        }
    }
}

/// Cell text: unknown and zero values render as a dash
pub fn display_value(value: Option<i64>) -> String {
    match value {
        None | Some(0) => "-".to_string(),
        Some(v) => v.to_string(),
    }
}

/// `"2024-11-08T00:00:00"` -> `"08/11"`. Works on the string itself so the
/// header never shifts with the browser timezone.
pub fn format_column_date(value: &str) -> String {
    let date = date_part(value);
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_year), Some(month), Some(day)) => format!("{}/{}", day, month),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_inventory(values: &[Option<i64>]) -> MatrixRow {
        MatrixRow {
            key: ProductKey::Product(ProductId(10)),
            label: "Leche".to_string(),
            cells: values
                .iter()
                .map(|v| MatrixCell {
                    previous_inventory: *v,
                    ..MatrixCell::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "-");
        assert_eq!(display_value(Some(0)), "-");
        assert_eq!(display_value(Some(12)), "12");
        assert_eq!(display_value(Some(-3)), "-3");
    }

    #[test]
    fn test_suggestion_on_inventory_drop() {
        let row = row_with_inventory(&[Some(20), Some(12)]);
        assert_eq!(row.suggestion(0), None);
        assert_eq!(row.suggestion(1), Some(8));
    }

    #[test]
    fn test_no_suggestion_when_unknown_or_rising() {
        let row = row_with_inventory(&[Some(20), None, Some(5), Some(5), Some(9)]);
        assert_eq!(row.suggestion(1), None);
        assert_eq!(row.suggestion(2), None);
        assert_eq!(row.suggestion(3), None);
        assert_eq!(row.suggestion(4), None);
        assert_eq!(row.suggestion(9), None);
    }

    #[test]
    fn test_format_column_date() {
        assert_eq!(format_column_date("2024-11-08"), "08/11");
        assert_eq!(format_column_date("2024-11-08T00:00:00"), "08/11");
        assert_eq!(format_column_date("ayer"), "ayer");
    }

    #[test]
    fn test_synthetic_key_uses_label_and_id() {
        let item = LineItem {
            id: LineItemId(77),
            purchase_id: None,
            product_id: None,
            product_name: None,
            quantity: None,
            previous_inventory: None,
        };
        assert_eq!(
            ProductKey::for_line_item(&item),
            ProductKey::Synthetic("Producto unk-77".to_string())
        );
    }
}
