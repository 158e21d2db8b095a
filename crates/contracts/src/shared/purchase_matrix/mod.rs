//! Purchase inventory matrix
//!
//! Pivots purchase records with nested line items into a product-by-purchase
//! table and reconciles inline cell edits back to individual line items.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::purchase_matrix::{EditField, MatrixController};
//!
//! let mut controller = MatrixController::new(3);
//! controller.load(purchases);
//!
//! controller.begin_edit(&key, 1, EditField::PreviousInventory)?;
//! let mutation = controller.commit_edit(15)?;
//! // send `mutation.patch` to the line-item endpoint, then:
//! let token = controller.confirm_edit()?;
//! controller.rebuild(Some(token));
//! ```

mod builder;
mod controller;
mod edit;
mod error;
mod model;

pub use builder::build_matrix;
pub use controller::{
    CellRef, EditState, MatrixController, PendingEdit, RebuildOutcome, SuppressRebuild,
};
pub use edit::{apply_edit, patch_purchases, EditOutcome, LineItemMutation};
pub use error::{MatrixError, Severity};
pub use model::{
    display_value, format_column_date, EditField, InventoryMatrix, MatrixCell, MatrixColumn,
    MatrixRow, ProductKey,
};
