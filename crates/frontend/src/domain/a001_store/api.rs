use contracts::domain::a001_store::{Store, StoreDto, StoreId};

use crate::shared::api_utils;

pub async fn fetch_stores() -> Result<Vec<Store>, String> {
    api_utils::get_json("/api/tienda/listar/").await
}

pub async fn create_store(dto: &StoreDto) -> Result<(), String> {
    api_utils::post("/api/tienda/crear/", dto).await
}

pub async fn update_store(id: StoreId, dto: &StoreDto) -> Result<(), String> {
    api_utils::patch(&format!("/api/tienda/actualizar/{}/", id), dto).await
}

pub async fn delete_store(id: StoreId) -> Result<(), String> {
    api_utils::delete(&format!("/api/tienda/eliminar/{}/", id)).await
}
