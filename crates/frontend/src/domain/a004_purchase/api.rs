use contracts::domain::a002_supplier::SupplierId;
use contracts::domain::a004_purchase::{
    LineItem, LineItemCreateDto, LineItemId, LineItemPatch, Purchase, PurchaseCreateDto, PurchaseId,
    PurchaseRangeQuery,
};

use crate::shared::api_utils;

fn range_path(supplier_id: SupplierId, query: &PurchaseRangeQuery) -> Result<String, String> {
    let query_string = serde_qs::to_string(query)
        .map_err(|e| format!("Failed to encode query: {}", e))?;
    Ok(format!("/api/compra/rango/{}/?{}", supplier_id, query_string))
}

/// Most recent purchases of a supplier within the optional date bounds,
/// oldest first. Without a supplier there is nothing to ask for.
pub async fn fetch_purchases(
    supplier_id: Option<SupplierId>,
    query: &PurchaseRangeQuery,
) -> Result<Vec<Purchase>, String> {
    let Some(supplier_id) = supplier_id else {
        return Ok(Vec::new());
    };
    api_utils::get_json(&range_path(supplier_id, query)?).await
}

/// Create an empty purchase; the backend seeds a zero line item for every
/// product of the supplier
pub async fn create_purchase(dto: &PurchaseCreateDto) -> Result<(), String> {
    api_utils::post("/api/compra/crear/", dto).await
}

pub async fn delete_purchase(id: PurchaseId) -> Result<(), String> {
    api_utils::delete(&format!("/api/compra/eliminar/{}/", id)).await
}

fn line_item_edit_path(id: LineItemId) -> String {
    format!("/api/compra/detalle/editar/{}/", id)
}

/// Overwrite one figure of a line item; answers with the stored line item
pub async fn patch_line_item(id: LineItemId, patch: &LineItemPatch) -> Result<LineItem, String> {
    api_utils::patch_json(&line_item_edit_path(id), patch).await
}

pub async fn create_line_item(purchase_id: PurchaseId, dto: &LineItemCreateDto) -> Result<(), String> {
    api_utils::post(&format!("/api/compra/detalle/crear/{}/", purchase_id), dto).await
}

pub async fn delete_line_item(id: LineItemId) -> Result<(), String> {
    api_utils::delete(&format!("/api/compra/detalle/eliminar/{}/", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_path_with_bounds() {
        let query = PurchaseRangeQuery::from_filters("2024-01-01", "2024-02-01", 3);
        assert_eq!(
            range_path(SupplierId(4), &query).unwrap(),
            "/api/compra/rango/4/?fecha_inicio=2024-01-01&fecha_fin=2024-02-01&limit=3&order=asc"
        );
    }

    #[test]
    fn test_range_path_without_bounds() {
        let query = PurchaseRangeQuery::from_filters("", "  ", 5);
        assert_eq!(
            range_path(SupplierId(4), &query).unwrap(),
            "/api/compra/rango/4/?limit=5&order=asc"
        );
    }

    #[test]
    fn test_line_item_edit_answer() {
        assert_eq!(line_item_edit_path(LineItemId(12)), "/api/compra/detalle/editar/12/");

        let saved: LineItem = serde_json::from_str(
            r#"{"id": 12, "compra": 3, "producto": 10, "cantidad": "7", "inventario_anterior": null}"#,
        )
        .unwrap();
        assert_eq!(saved.id, LineItemId(12));
        assert_eq!(saved.quantity_value(), 7);
        assert_eq!(saved.previous_inventory_value(), None);
    }
}
