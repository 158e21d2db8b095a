use super::error::MatrixError;
use super::model::{EditField, InventoryMatrix, ProductKey};
use crate::domain::a004_purchase::{LineItemId, LineItemPatch, Purchase};

/// Partial update to send for one edited cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemMutation {
    pub line_item_id: LineItemId,
    pub patch: LineItemPatch,
}

impl LineItemMutation {
    pub fn new(line_item_id: LineItemId, field: EditField, value: i64) -> Self {
        let patch = match field {
            EditField::Quantity => LineItemPatch::quantity(value),
            EditField::PreviousInventory => LineItemPatch::previous_inventory(value),
        };
        Self {
            line_item_id,
            patch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Matrix with the edit already applied
    pub matrix: InventoryMatrix,
    pub mutation: LineItemMutation,
}

/// Apply one cell edit to a copy of `matrix`.
///
/// The entered value replaces the stored figure as is; previous inventory is
/// an absolute count, never a delta. Fails without touching anything when the
/// row or column is gone, or when the product has no line item in that
/// column.
pub fn apply_edit(
    matrix: &InventoryMatrix,
    key: &ProductKey,
    column: usize,
    field: EditField,
    value: i64,
) -> Result<EditOutcome, MatrixError> {
    let row = matrix
        .row(key)
        .ok_or_else(|| MatrixError::RowNotFound(key.clone()))?;
    let cell = row
        .cell(column)
        .ok_or(MatrixError::ColumnNotFound(column))?;
    let line_item_id = cell
        .line_item_id
        .ok_or_else(|| MatrixError::NoTargetLineItem {
            key: key.clone(),
            column,
        })?;

    let mut updated = matrix.clone();
    if let Some(row) = updated.row_mut(key) {
        row.cells[column].set(field, value);
    }

    Ok(EditOutcome {
        matrix: updated,
        mutation: LineItemMutation::new(line_item_id, field, value),
    })
}

/// Mirror a confirmed mutation into the cached purchase list so a later
/// rebuild agrees with the optimistic matrix. Returns false when no cached
/// purchase holds the line item.
pub fn patch_purchases(purchases: &mut [Purchase], mutation: &LineItemMutation) -> bool {
    purchases
        .iter_mut()
        .any(|purchase| purchase.patch_line_item(mutation.line_item_id, &mutation.patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_product::ProductId;
    use crate::shared::numeric::LooseInt;
    use crate::shared::purchase_matrix::build_matrix;
    use crate::shared::purchase_matrix::builder::fixtures::*;

    fn key(id: i64) -> ProductKey {
        ProductKey::Product(ProductId(id))
    }

    #[test]
    fn test_previous_inventory_edit_is_absolute() {
        let matrix = build_matrix(&two_weeks(), 2);

        let outcome = apply_edit(&matrix, &key(10), 0, EditField::PreviousInventory, 15).unwrap();

        let cell = outcome.matrix.cell(&key(10), 0).unwrap();
        assert_eq!(cell.previous_inventory, Some(15));
        assert_eq!(cell.quantity, Some(5));
        assert_eq!(outcome.mutation.line_item_id, LineItemId(1));
        assert_eq!(outcome.mutation.patch, LineItemPatch::previous_inventory(15));
        assert_eq!(matrix.cell(&key(10), 0).unwrap().previous_inventory, Some(20));
    }

    #[test]
    fn test_quantity_edit_patches_cantidad_only() {
        let matrix = build_matrix(&two_weeks(), 2);

        let outcome = apply_edit(&matrix, &key(10), 1, EditField::Quantity, 7).unwrap();

        assert_eq!(outcome.matrix.cell(&key(10), 1).unwrap().quantity, Some(7));
        assert_eq!(
            serde_json::to_value(&outcome.mutation.patch).unwrap(),
            serde_json::json!({"cantidad": 7})
        );
    }

    #[test]
    fn test_edit_without_line_item_is_rejected() {
        let purchases = vec![
            purchase(1, "2024-01-01", vec![line(1, Some(10), LooseInt::Int(1), None)]),
            purchase(2, "2024-01-08", vec![line(2, Some(20), LooseInt::Int(1), None)]),
        ];
        let matrix = build_matrix(&purchases, 2);

        let result = apply_edit(&matrix, &key(10), 1, EditField::Quantity, 4);

        assert_eq!(
            result,
            Err(MatrixError::NoTargetLineItem {
                key: key(10),
                column: 1
            })
        );
        assert_eq!(matrix, build_matrix(&purchases, 2));
    }

    #[test]
    fn test_edit_unknown_row_or_column() {
        let matrix = build_matrix(&two_weeks(), 2);

        let missing_row = apply_edit(&matrix, &key(99), 0, EditField::Quantity, 1);
        assert_eq!(missing_row, Err(MatrixError::RowNotFound(key(99))));

        let missing_column = apply_edit(&matrix, &key(10), 5, EditField::Quantity, 1);
        assert_eq!(missing_column, Err(MatrixError::ColumnNotFound(5)));
    }

    #[test]
    fn test_patch_purchases_then_rebuild_agrees() {
        let mut purchases = two_weeks();
        let matrix = build_matrix(&purchases, 2);
        let outcome = apply_edit(&matrix, &key(10), 1, EditField::PreviousInventory, 30).unwrap();

        assert!(patch_purchases(&mut purchases, &outcome.mutation));
        assert_eq!(build_matrix(&purchases, 2), outcome.matrix);
    }

    #[test]
    fn test_patch_purchases_unknown_line_item() {
        let mut purchases = two_weeks();
        let mutation = LineItemMutation::new(LineItemId(404), EditField::Quantity, 1);
        assert!(!patch_purchases(&mut purchases, &mutation));
    }
}
