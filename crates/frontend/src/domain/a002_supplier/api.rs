use contracts::domain::a001_store::StoreId;
use contracts::domain::a002_supplier::{Supplier, SupplierCreateDto, SupplierId, SupplierUpdateDto};

use crate::shared::api_utils;

/// Suppliers of one store
pub async fn fetch_suppliers(store_id: StoreId) -> Result<Vec<Supplier>, String> {
    api_utils::get_json(&format!("/api/proveedor/listar/{}/", store_id)).await
}

pub async fn create_supplier(dto: &SupplierCreateDto) -> Result<(), String> {
    api_utils::post("/api/proveedor/crear/", dto).await
}

pub async fn update_supplier(id: SupplierId, dto: &SupplierUpdateDto) -> Result<(), String> {
    api_utils::patch(&format!("/api/proveedor/actualizar/{}/", id), dto).await
}

pub async fn delete_supplier(id: SupplierId) -> Result<(), String> {
    api_utils::delete(&format!("/api/proveedor/eliminar/{}/", id)).await
}
