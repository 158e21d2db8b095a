pub mod a001_store;
pub mod a002_supplier;
pub mod a003_product;
pub mod a004_purchase;
pub mod common;
