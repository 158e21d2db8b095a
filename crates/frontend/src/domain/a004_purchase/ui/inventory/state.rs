use contracts::domain::a004_purchase::PurchaseRangeQuery;
use contracts::shared::numeric::parse_int_prefix;
use contracts::shared::purchase_matrix::{MatrixController, RebuildOutcome, SuppressRebuild};
use leptos::prelude::*;

use crate::shared::config::config;

/// Signals of the purchases page. The matrix itself lives in the controller;
/// everything else is filter input or a refetch trigger.
#[derive(Clone, Copy)]
pub struct InventoryState {
    pub date_from: RwSignal<String>,
    pub date_to: RwSignal<String>,
    /// Raw text of the "purchases shown" input
    pub limit: RwSignal<String>,
    pub controller: RwSignal<MatrixController>,
    pub loading: RwSignal<bool>,
    /// Text typed into the focused cell
    pub draft: RwSignal<String>,
    /// Bumped to refetch from the backend
    pub revision: RwSignal<u32>,
    /// Bumped when the cached purchases were patched locally
    pub cache_version: RwSignal<u32>,
    suppress: StoredValue<Option<SuppressRebuild>>,
    request_seq: StoredValue<u64>,
}

pub fn create_state() -> InventoryState {
    let column_limit = config().inventory.column_limit;
    InventoryState {
        date_from: RwSignal::new(String::new()),
        date_to: RwSignal::new(String::new()),
        limit: RwSignal::new(column_limit.to_string()),
        controller: RwSignal::new(MatrixController::new(column_limit)),
        loading: RwSignal::new(false),
        draft: RwSignal::new(String::new()),
        revision: RwSignal::new(0),
        cache_version: RwSignal::new(0),
        suppress: StoredValue::new(None),
        request_seq: StoredValue::new(0),
    }
}

/// Column limit typed by the user; anything unusable falls back to `default`.
/// Values past `u32::MAX` are unusable on every target.
pub fn parse_limit(input: &str, default: usize) -> usize {
    match parse_int_prefix(input) {
        Ok(value) if value >= 1 => u32::try_from(value)
            .ok()
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or(default),
        _ => default,
    }
}

impl InventoryState {
    pub fn column_limit(&self) -> usize {
        parse_limit(&self.limit.get(), config().inventory.column_limit)
    }

    pub fn range_query(&self) -> PurchaseRangeQuery {
        PurchaseRangeQuery::from_filters(
            &self.date_from.get(),
            &self.date_to.get(),
            self.column_limit(),
        )
    }

    pub fn refetch(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Start a fetch; the returned number identifies it in `is_current`
    pub fn next_request(&self) -> u64 {
        self.request_seq.update_value(|seq| *seq += 1);
        self.request_seq.get_value()
    }

    /// No supplier selected: empty the matrix and drop the answer of any
    /// fetch still in flight for the previous supplier
    pub fn clear_selection(&self) {
        self.next_request();
        self.loading.set(false);
        self.controller.update(|controller| controller.reset());
    }

    /// False once a newer fetch has started
    pub fn is_current(&self, request: u64) -> bool {
        self.request_seq.get_value() == request
    }

    /// Record a confirmed edit. Its token waits for the rebuild the cache
    /// change triggers; tokens of edits confirmed meanwhile are merged.
    pub fn defer_suppression(&self, token: SuppressRebuild) {
        self.suppress.update_value(|slot| {
            *slot = Some(match slot.take() {
                Some(pending) => pending.merge(token),
                None => token,
            });
        });
        self.cache_version.update(|v| *v += 1);
    }

    /// Rebuild after a local cache change, consuming a pending token
    pub fn rebuild_from_cache(&self) -> Option<RebuildOutcome> {
        let mut token = None;
        self.suppress.update_value(|slot| token = slot.take());
        self.controller.try_update(|controller| controller.rebuild(token))
    }

    /// A fresh fetch makes any pending token moot
    pub fn clear_suppression(&self) {
        self.suppress.set_value(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("5", 3), 5);
        assert_eq!(parse_limit("4 compras", 3), 4);
        assert_eq!(parse_limit("0", 3), 3);
        assert_eq!(parse_limit("-2", 3), 3);
        assert_eq!(parse_limit("", 3), 3);
    }

    #[test]
    fn test_clear_selection_drops_fetch_in_flight() {
        let state = create_state();
        let request = state.next_request();
        state.loading.set(true);

        state.clear_selection();

        assert!(!state.is_current(request));
        assert!(!state.loading.get_untracked());
        assert!(state.controller.with_untracked(|c| c.matrix().is_empty()));
    }

    #[test]
    fn test_parse_limit_out_of_range() {
        assert_eq!(parse_limit("4294967295", 3), 4_294_967_295);
        assert_eq!(parse_limit("4294967297", 3), 3);
        assert_eq!(parse_limit("99999999999999999999", 3), 3);
    }
}
