//! Shared contracts between the console frontend and the purchasing REST API.
//!
//! - `domain`: wire DTOs for stores, suppliers, products and purchases
//! - `system`: session, user and permission types
//! - `shared`: numeric coercion and the purchase inventory matrix

pub mod domain;
pub mod shared;
pub mod system;
