use super::model::{InventoryMatrix, MatrixCell, MatrixColumn, MatrixRow, ProductKey};
use crate::domain::a004_purchase::Purchase;
use std::collections::HashMap;

/// Build the inventory matrix from the `column_limit` most recent purchases.
///
/// Purchases are ordered by the date portion of `purchase_date` with a stable
/// sort, so same-day purchases keep their input order. Rows appear in the
/// order their product is first met, scanning columns left to right and line
/// items in their given order. The first label seen for a product wins.
pub fn build_matrix(purchases: &[Purchase], column_limit: usize) -> InventoryMatrix {
    if purchases.is_empty() {
        return InventoryMatrix::default();
    }

    let mut sorted: Vec<&Purchase> = purchases.iter().collect();
    sorted.sort_by(|a, b| a.date().cmp(b.date()));

    let limit = column_limit.max(1);
    let selected = &sorted[sorted.len().saturating_sub(limit)..];

    let columns: Vec<MatrixColumn> = selected
        .iter()
        .map(|purchase| MatrixColumn {
            purchase_id: purchase.id,
            purchase_date: purchase.purchase_date.clone(),
        })
        .collect();

    let mut rows: Vec<MatrixRow> = Vec::new();
    let mut index: HashMap<ProductKey, usize> = HashMap::new();

    for (column, purchase) in selected.iter().enumerate() {
        for item in &purchase.line_items {
            let key = ProductKey::for_line_item(item);
            let position = *index.entry(key.clone()).or_insert_with(|| {
                rows.push(MatrixRow::new(key, item.product_label(), columns.len()));
                rows.len() - 1
            });

            rows[position].cells[column] = MatrixCell {
                quantity: Some(item.quantity_value()),
                previous_inventory: item.previous_inventory_value(),
                line_item_id: Some(item.id),
            };
        }
    }

    log::debug!(
        "inventory matrix built: {} purchases -> {} columns x {} rows",
        purchases.len(),
        columns.len(),
        rows.len()
    );

    InventoryMatrix { columns, rows }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::a002_supplier::SupplierId;
    use crate::domain::a003_product::ProductId;
    use crate::domain::a004_purchase::{LineItem, LineItemId, Purchase, PurchaseId};
    use crate::shared::numeric::LooseInt;

    pub fn line(id: i64, product: Option<i64>, qty: LooseInt, prev: Option<LooseInt>) -> LineItem {
        LineItem {
            id: LineItemId(id),
            purchase_id: None,
            product_id: product.map(ProductId),
            product_name: product.map(|p| format!("Producto {}", p)),
            quantity: Some(qty),
            previous_inventory: prev,
        }
    }

    pub fn purchase(id: i64, date: &str, line_items: Vec<LineItem>) -> Purchase {
        let mut line_items = line_items;
        for item in &mut line_items {
            item.purchase_id = Some(PurchaseId(id));
        }
        Purchase {
            id: PurchaseId(id),
            supplier_id: SupplierId(1),
            purchase_date: date.to_string(),
            line_items,
        }
    }

    /// The two-purchase example: product 10 bought twice, inventory 20 -> 12
    pub fn two_weeks() -> Vec<Purchase> {
        vec![
            purchase(
                1,
                "2024-01-01",
                vec![line(1, Some(10), LooseInt::Int(5), Some(LooseInt::Int(20)))],
            ),
            purchase(
                2,
                "2024-01-08",
                vec![line(2, Some(10), LooseInt::Int(3), Some(LooseInt::Int(12)))],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::a003_product::ProductId;
    use crate::domain::a004_purchase::{LineItemId, PurchaseId};
    use crate::shared::numeric::LooseInt;

    #[test]
    fn test_empty_input() {
        let matrix = build_matrix(&[], 3);
        assert!(matrix.columns.is_empty());
        assert!(matrix.rows.is_empty());
    }

    #[test]
    fn test_two_purchase_example() {
        let matrix = build_matrix(&two_weeks(), 2);

        assert_eq!(matrix.columns.len(), 2);
        assert_eq!(matrix.rows.len(), 1);

        let row = &matrix.rows[0];
        assert_eq!(row.key, ProductKey::Product(ProductId(10)));
        assert_eq!(row.cells[0].quantity, Some(5));
        assert_eq!(row.cells[0].previous_inventory, Some(20));
        assert_eq!(row.cells[1].quantity, Some(3));
        assert_eq!(row.cells[1].previous_inventory, Some(12));
        assert_eq!(row.suggestion(0), None);
        assert_eq!(row.suggestion(1), Some(8));
    }

    #[test]
    fn test_keeps_most_recent_purchases_oldest_first() {
        let purchases = vec![
            purchase(3, "2024-03-01", vec![]),
            purchase(1, "2024-01-01", vec![]),
            purchase(4, "2024-04-01T10:00:00", vec![]),
            purchase(2, "2024-02-01", vec![]),
        ];

        let matrix = build_matrix(&purchases, 3);

        let ids: Vec<PurchaseId> = matrix.columns.iter().map(|c| c.purchase_id).collect();
        assert_eq!(ids, vec![PurchaseId(2), PurchaseId(3), PurchaseId(4)]);
    }

    #[test]
    fn test_column_count_is_min_of_limit_and_input() {
        let purchases = two_weeks();
        for limit in 1..=5 {
            let matrix = build_matrix(&purchases, limit);
            assert_eq!(matrix.columns.len(), limit.min(purchases.len()));
            assert!(matrix
                .columns
                .windows(2)
                .all(|w| w[0].purchase_date <= w[1].purchase_date));
        }
    }

    #[test]
    fn test_same_day_purchases_keep_input_order() {
        let purchases = vec![
            purchase(9, "2024-05-05", vec![]),
            purchase(5, "2024-05-05T08:00:00", vec![]),
            purchase(7, "2024-05-04", vec![]),
        ];

        let matrix = build_matrix(&purchases, 3);

        let ids: Vec<PurchaseId> = matrix.columns.iter().map(|c| c.purchase_id).collect();
        assert_eq!(ids, vec![PurchaseId(7), PurchaseId(9), PurchaseId(5)]);
    }

    #[test]
    fn test_unknown_previous_inventory_is_null_not_zero() {
        let purchases = vec![purchase(
            1,
            "2024-01-01",
            vec![line(1, Some(10), LooseInt::from("4"), Some(LooseInt::from("?")))],
        )];

        let matrix = build_matrix(&purchases, 3);
        let cell = &matrix.rows[0].cells[0];

        assert_eq!(cell.previous_inventory, None);
        assert_eq!(cell.quantity, Some(4));
        assert_eq!(super::super::display_value(cell.previous_inventory), "-");
    }

    #[test]
    fn test_unparseable_quantity_is_zero() {
        let purchases = vec![purchase(
            1,
            "2024-01-01",
            vec![line(1, Some(10), LooseInt::from("n/a"), None)],
        )];

        let matrix = build_matrix(&purchases, 1);
        assert_eq!(matrix.rows[0].cells[0].quantity, Some(0));
    }

    #[test]
    fn test_missing_product_gets_its_own_row() {
        let purchases = vec![purchase(
            1,
            "2024-01-01",
            vec![
                line(1, None, LooseInt::Int(1), None),
                line(2, None, LooseInt::Int(2), None),
                line(3, Some(10), LooseInt::Int(3), None),
            ],
        )];

        let matrix = build_matrix(&purchases, 1);

        assert_eq!(matrix.rows.len(), 3);
        assert_eq!(
            matrix.rows[0].key,
            ProductKey::Synthetic("Producto unk-1".to_string())
        );
        assert_eq!(matrix.rows[0].label, "Producto unk");
    }

    #[test]
    fn test_first_label_wins_and_rows_in_first_seen_order() {
        let mut renamed = line(4, Some(10), LooseInt::Int(1), None);
        renamed.product_name = Some("Leche entera".to_string());

        let purchases = vec![
            purchase(
                1,
                "2024-01-01",
                vec![
                    line(1, Some(20), LooseInt::Int(1), None),
                    line(2, Some(10), LooseInt::Int(1), None),
                ],
            ),
            purchase(
                2,
                "2024-01-08",
                vec![renamed, line(3, Some(30), LooseInt::Int(1), None)],
            ),
        ];

        let matrix = build_matrix(&purchases, 2);

        let keys: Vec<String> = matrix.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["20", "10", "30"]);
        assert_eq!(matrix.rows[1].label, "Producto 10");
    }

    #[test]
    fn test_line_item_id_present_only_where_product_was_bought() {
        let purchases = vec![
            purchase(1, "2024-01-01", vec![line(1, Some(10), LooseInt::Int(1), None)]),
            purchase(2, "2024-01-08", vec![line(2, Some(20), LooseInt::Int(1), None)]),
        ];

        let matrix = build_matrix(&purchases, 2);
        let row = matrix.row(&ProductKey::Product(ProductId(10))).unwrap();

        assert_eq!(row.cells[0].line_item_id, Some(LineItemId(1)));
        assert_eq!(row.cells[1].line_item_id, None);
        assert_eq!(row.cells[1].quantity, None);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let purchases = two_weeks();
        assert_eq!(build_matrix(&purchases, 3), build_matrix(&purchases, 3));
    }
}
