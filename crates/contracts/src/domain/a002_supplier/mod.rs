pub mod aggregate;

pub use aggregate::{Supplier, SupplierCreateDto, SupplierId, SupplierUpdateDto};
