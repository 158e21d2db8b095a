//! Page category constants.
//!
//! Every page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_store--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The entity part is the directory name under `domain/` (`sys_` plus the
//! name under `system/` for system pages), so an id copied from the DOM
//! inspector leads straight to the code.

/// Records of one aggregate with create/rename/delete actions.
pub const PAGE_CAT_LIST: &str = "list";

/// Editable pivot of several aggregates (the purchases inventory matrix).
pub const PAGE_CAT_MATRIX: &str = "matrix";

/// Login, session and user administration pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_MATRIX, PAGE_CAT_SYSTEM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

/// Return true if the category value is recognised.
pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a004_purchase--matrix"));
        assert!(!is_valid_page_id("a004_purchase"));
        assert!(!is_valid_page_id("--list"));
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_LIST));
        assert!(!is_known_category("dashboard"));
    }
}
