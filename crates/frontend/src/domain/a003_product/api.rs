use contracts::domain::a002_supplier::SupplierId;
use contracts::domain::a003_product::{
    MoveDirection, Product, ProductCreateDto, ProductId, ProductMoveRequest, ProductUpdateDto,
};

use crate::shared::api_utils;

/// Products of one supplier, in the supplier's display order
pub async fn fetch_products(supplier_id: SupplierId) -> Result<Vec<Product>, String> {
    api_utils::get_json(&format!("/api/producto/listar/{}/", supplier_id)).await
}

pub async fn create_product(dto: &ProductCreateDto) -> Result<(), String> {
    api_utils::post("/api/producto/crear/", dto).await
}

pub async fn update_product(id: ProductId, dto: &ProductUpdateDto) -> Result<(), String> {
    api_utils::patch(&format!("/api/producto/actualizar/{}/", id), dto).await
}

pub async fn delete_product(id: ProductId) -> Result<(), String> {
    api_utils::delete(&format!("/api/producto/eliminar/{}/", id)).await
}

/// Swap the product with its neighbour in the display order
pub async fn move_product(product_id: ProductId, direction: MoveDirection) -> Result<(), String> {
    let request = ProductMoveRequest {
        product_id,
        direction,
    };
    api_utils::post("/api/producto/mover/", &request).await
}
