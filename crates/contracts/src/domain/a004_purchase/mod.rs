pub mod aggregate;
pub mod line_item;
pub mod query;

pub use aggregate::{date_part, Purchase, PurchaseCreateDto, PurchaseId};
pub use line_item::{LineItem, LineItemCreateDto, LineItemId, LineItemPatch};
pub use query::{PurchaseRangeQuery, SortOrder, DEFAULT_RANGE_LIMIT};
