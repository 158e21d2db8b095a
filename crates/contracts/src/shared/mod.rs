pub mod numeric;
pub mod purchase_matrix;
