use super::builder::build_matrix;
use super::edit::{apply_edit, patch_purchases, LineItemMutation};
use super::error::MatrixError;
use super::model::{EditField, InventoryMatrix, MatrixCell, ProductKey};
use crate::domain::a004_purchase::Purchase;

/// Address of one editable figure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub key: ProductKey,
    pub column: usize,
    pub field: EditField,
}

/// Edit in flight: what was sent and what to restore if it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub cell: CellRef,
    pub mutation: LineItemMutation,
    previous: MatrixCell,
    /// The matrix was rebuilt after the optimistic update, so it no longer
    /// holds the edited value and `previous` no longer describes its cells
    superseded: bool,
}

/// `Idle -> Editing -> Saving -> Idle`. One cell at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(CellRef),
    Saving(PendingEdit),
}

/// One-shot permission to skip the next rebuild.
///
/// Issued when a confirmed edit is mirrored into the purchase cache: the
/// matrix already shows the edited value, so the rebuild that the cache
/// change triggers is redundant and could race a stale list. Tokens from
/// several edits confirmed before that rebuild merge into one.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct SuppressRebuild {
    edits: usize,
}

impl SuppressRebuild {
    fn new() -> Self {
        Self { edits: 1 }
    }

    /// Fold another confirmation into this token; still skips one rebuild
    pub fn merge(self, other: SuppressRebuild) -> Self {
        Self {
            edits: self.edits + other.edits,
        }
    }

    /// Number of confirmed edits covered by this token
    pub fn edits(&self) -> usize {
        self.edits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Rebuilt,
    Suppressed,
}

/// Owns the cached purchase list of the current filter selection and the
/// matrix derived from it
#[derive(Debug, Clone)]
pub struct MatrixController {
    column_limit: usize,
    purchases: Vec<Purchase>,
    matrix: InventoryMatrix,
    state: EditState,
}

impl MatrixController {
    pub fn new(column_limit: usize) -> Self {
        Self {
            column_limit: column_limit.max(1),
            purchases: Vec::new(),
            matrix: InventoryMatrix::default(),
            state: EditState::Idle,
        }
    }

    pub fn column_limit(&self) -> usize {
        self.column_limit
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn matrix(&self) -> &InventoryMatrix {
        &self.matrix
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Cell currently focused or being saved
    pub fn active_cell(&self) -> Option<&CellRef> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(cell) => Some(cell),
            EditState::Saving(pending) => Some(&pending.cell),
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditState::Saving(_))
    }

    /// Replace the cache with a freshly fetched list and rebuild.
    ///
    /// An authoritative fetch always rebuilds. A focused cell loses focus;
    /// a save in flight keeps running.
    pub fn load(&mut self, purchases: Vec<Purchase>) {
        self.purchases = purchases;
        if let EditState::Editing(_) = self.state {
            self.state = EditState::Idle;
        }
        self.rebuild_matrix();
    }

    /// Change how many purchases are shown and rebuild from the cache
    pub fn set_column_limit(&mut self, column_limit: usize) {
        self.column_limit = column_limit.max(1);
        self.rebuild_matrix();
    }

    fn rebuild_matrix(&mut self) {
        self.matrix = build_matrix(&self.purchases, self.column_limit);
        if let EditState::Saving(pending) = &mut self.state {
            pending.superseded = true;
        }
    }

    /// Rebuild the matrix after the cached purchase list changed, unless a
    /// suppression token is handed in, in which case the token is consumed
    /// and the current matrix is kept.
    pub fn rebuild(&mut self, suppress: Option<SuppressRebuild>) -> RebuildOutcome {
        if let Some(token) = suppress {
            log::debug!(
                "matrix rebuild skipped after {} optimistic edit(s)",
                token.edits()
            );
            return RebuildOutcome::Suppressed;
        }
        self.rebuild_matrix();
        RebuildOutcome::Rebuilt
    }

    /// Focus a cell. Returns its current value to prefill the input.
    pub fn begin_edit(
        &mut self,
        key: &ProductKey,
        column: usize,
        field: EditField,
    ) -> Result<Option<i64>, MatrixError> {
        if self.is_saving() {
            return Err(MatrixError::EditInProgress);
        }
        let row = self
            .matrix
            .row(key)
            .ok_or_else(|| MatrixError::RowNotFound(key.clone()))?;
        let cell = row
            .cell(column)
            .ok_or(MatrixError::ColumnNotFound(column))?;
        let current = cell.value(field);

        self.state = EditState::Editing(CellRef {
            key: key.clone(),
            column,
            field,
        });
        Ok(current)
    }

    /// Drop focus without saving
    pub fn cancel_edit(&mut self) {
        if let EditState::Editing(_) = self.state {
            self.state = EditState::Idle;
        }
    }

    /// Apply the entered value optimistically and hand back the mutation to
    /// send. On a rejected edit the state returns to `Idle` and the matrix is
    /// untouched.
    pub fn commit_edit(&mut self, value: i64) -> Result<LineItemMutation, MatrixError> {
        let cell = match &self.state {
            EditState::Editing(cell) => cell.clone(),
            EditState::Saving(_) => return Err(MatrixError::EditInProgress),
            EditState::Idle => return Err(MatrixError::NoActiveEdit),
        };

        let outcome = match apply_edit(&self.matrix, &cell.key, cell.column, cell.field, value) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("edit of {} column {} rejected: {}", cell.key, cell.column, e);
                self.state = EditState::Idle;
                return Err(e);
            }
        };

        let previous = self
            .matrix
            .cell(&cell.key, cell.column)
            .cloned()
            .unwrap_or_default();
        self.matrix = outcome.matrix;
        self.state = EditState::Saving(PendingEdit {
            cell,
            mutation: outcome.mutation.clone(),
            previous,
            superseded: false,
        });

        log::debug!(
            "saving line item {} ({:?})",
            outcome.mutation.line_item_id,
            outcome.mutation.patch
        );
        Ok(outcome.mutation)
    }

    /// The backend accepted the pending mutation: mirror it into the cached
    /// purchases and return the token for the rebuild this cache change
    /// triggers. If the matrix was rebuilt while saving, it is rebuilt again
    /// here so the accepted value shows.
    pub fn confirm_edit(&mut self) -> Result<SuppressRebuild, MatrixError> {
        let pending = match std::mem::take(&mut self.state) {
            EditState::Saving(pending) => pending,
            other => {
                self.state = other;
                return Err(MatrixError::NoActiveEdit);
            }
        };

        if !patch_purchases(&mut self.purchases, &pending.mutation) {
            log::warn!(
                "line item {} not in cached purchases",
                pending.mutation.line_item_id
            );
        }
        if pending.superseded {
            self.matrix = build_matrix(&self.purchases, self.column_limit);
        }
        Ok(SuppressRebuild::new())
    }

    /// The backend rejected the pending mutation: restore the edited figure
    /// as it was before the edit and return the error to surface. No retry.
    ///
    /// A matrix rebuilt while saving already shows the cached figures and is
    /// left alone. The figure is only restored into the cell that still
    /// targets the line item the mutation was sent for.
    pub fn fail_edit(&mut self, reason: impl Into<String>) -> MatrixError {
        let error = MatrixError::MutationFailed(reason.into());
        match std::mem::take(&mut self.state) {
            EditState::Saving(pending) => {
                if !pending.superseded {
                    self.restore(&pending);
                }
                log::warn!(
                    "line item {} update rolled back: {}",
                    pending.mutation.line_item_id,
                    error
                );
            }
            other => self.state = other,
        }
        error
    }

    fn restore(&mut self, pending: &PendingEdit) {
        let target = Some(pending.mutation.line_item_id);
        let cell = self
            .matrix
            .row_mut(&pending.cell.key)
            .and_then(|row| row.cells.get_mut(pending.cell.column))
            .filter(|cell| cell.line_item_id == target);
        if let Some(cell) = cell {
            let field = pending.cell.field;
            match pending.previous.value(field) {
                Some(value) => cell.set(field, value),
                None => cell.clear(field),
            }
        }
    }

    /// Forget the selection: cache, matrix and edit state
    pub fn reset(&mut self) {
        self.purchases.clear();
        self.matrix = InventoryMatrix::default();
        self.state = EditState::Idle;
    }
}

impl Default for MatrixController {
    fn default() -> Self {
        Self::new(crate::domain::a004_purchase::DEFAULT_RANGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_product::ProductId;
    use crate::domain::a004_purchase::{LineItemId, LineItemPatch, PurchaseId};
    use crate::shared::numeric::LooseInt;
    use crate::shared::purchase_matrix::builder::fixtures::*;

    fn key(id: i64) -> ProductKey {
        ProductKey::Product(ProductId(id))
    }

    fn loaded() -> MatrixController {
        let mut controller = MatrixController::new(2);
        controller.load(two_weeks());
        controller
    }

    #[test]
    fn test_successful_edit_cycle() {
        let mut controller = loaded();

        let current = controller
            .begin_edit(&key(10), 1, EditField::PreviousInventory)
            .unwrap();
        assert_eq!(current, Some(12));

        let mutation = controller.commit_edit(15).unwrap();
        assert_eq!(mutation.line_item_id, LineItemId(2));
        assert_eq!(mutation.patch, LineItemPatch::previous_inventory(15));
        assert!(controller.is_saving());
        assert_eq!(
            controller.matrix().cell(&key(10), 1).unwrap().previous_inventory,
            Some(15)
        );

        let token = controller.confirm_edit().unwrap();
        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(
            controller.purchases()[1].line_items[0].previous_inventory,
            Some(LooseInt::Int(15))
        );

        assert_eq!(controller.rebuild(Some(token)), RebuildOutcome::Suppressed);
        assert_eq!(controller.rebuild(None), RebuildOutcome::Rebuilt);
        assert_eq!(
            controller.matrix().cell(&key(10), 1).unwrap().previous_inventory,
            Some(15)
        );
    }

    #[test]
    fn test_failed_edit_rolls_back() {
        let mut controller = loaded();
        let before = controller.matrix().clone();

        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller.commit_edit(99).unwrap();

        let error = controller.fail_edit("HTTP 500");

        assert_eq!(error, MatrixError::MutationFailed("HTTP 500".to_string()));
        assert_eq!(controller.matrix(), &before);
        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(
            controller.purchases()[0].line_items[0].quantity,
            Some(LooseInt::Int(5))
        );
    }

    #[test]
    fn test_single_active_edit() {
        let mut controller = loaded();

        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller.commit_edit(1).unwrap();

        assert_eq!(
            controller.begin_edit(&key(10), 1, EditField::Quantity),
            Err(MatrixError::EditInProgress)
        );
        assert_eq!(controller.commit_edit(2), Err(MatrixError::EditInProgress));
    }

    #[test]
    fn test_refocus_replaces_editing_cell() {
        let mut controller = loaded();

        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller
            .begin_edit(&key(10), 1, EditField::PreviousInventory)
            .unwrap();

        assert_eq!(
            controller.active_cell(),
            Some(&CellRef {
                key: key(10),
                column: 1,
                field: EditField::PreviousInventory,
            })
        );
    }

    #[test]
    fn test_edit_without_target_returns_to_idle() {
        let mut controller = MatrixController::new(2);
        controller.load(vec![
            purchase(1, "2024-01-01", vec![line(1, Some(10), LooseInt::Int(1), None)]),
            purchase(2, "2024-01-08", vec![line(2, Some(20), LooseInt::Int(1), None)]),
        ]);
        let before = controller.matrix().clone();

        controller.begin_edit(&key(10), 1, EditField::Quantity).unwrap();
        let result = controller.commit_edit(3);

        assert!(matches!(result, Err(MatrixError::NoTargetLineItem { .. })));
        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(controller.matrix(), &before);
    }

    #[test]
    fn test_commit_without_focus() {
        let mut controller = loaded();
        assert_eq!(controller.commit_edit(1), Err(MatrixError::NoActiveEdit));
        assert_eq!(controller.confirm_edit(), Err(MatrixError::NoActiveEdit));
    }

    #[test]
    fn test_begin_edit_on_vanished_row() {
        let mut controller = loaded();
        assert_eq!(
            controller.begin_edit(&key(77), 0, EditField::Quantity),
            Err(MatrixError::RowNotFound(key(77)))
        );
        assert_eq!(controller.state(), &EditState::Idle);
    }

    #[test]
    fn test_merged_tokens_skip_one_rebuild() {
        let mut controller = loaded();

        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller.commit_edit(8).unwrap();
        let first = controller.confirm_edit().unwrap();

        controller.begin_edit(&key(10), 1, EditField::Quantity).unwrap();
        controller.commit_edit(9).unwrap();
        let second = controller.confirm_edit().unwrap();

        let token = first.merge(second);
        assert_eq!(token.edits(), 2);
        assert_eq!(controller.rebuild(Some(token)), RebuildOutcome::Suppressed);
        assert_eq!(controller.rebuild(None), RebuildOutcome::Rebuilt);

        let row = controller.matrix().row(&key(10)).unwrap();
        assert_eq!(row.cells[0].quantity, Some(8));
        assert_eq!(row.cells[1].quantity, Some(9));
    }

    #[test]
    fn test_load_always_rebuilds_and_keeps_save_in_flight() {
        let mut controller = loaded();
        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller.commit_edit(4).unwrap();

        controller.load(two_weeks());

        assert!(controller.is_saving());
        assert_eq!(controller.matrix().cell(&key(10), 0).unwrap().quantity, Some(5));
    }

    #[test]
    fn test_failed_edit_after_reload_keeps_fresh_figures() {
        let mut controller = loaded();
        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        controller.commit_edit(99).unwrap();

        let mut fresh = two_weeks();
        fresh[0].line_items[0].quantity = Some(LooseInt::Int(42));
        controller.load(fresh);

        controller.fail_edit("HTTP 500");

        assert_eq!(controller.state(), &EditState::Idle);
        assert_eq!(controller.matrix().cell(&key(10), 0).unwrap().quantity, Some(42));
        assert_eq!(
            controller.purchases()[0].line_items[0].quantity,
            Some(LooseInt::Int(42))
        );
    }

    #[test]
    fn test_failed_edit_after_columns_shift_keeps_line_item_targets() {
        let mut controller = loaded();
        controller.begin_edit(&key(10), 0, EditField::Quantity).unwrap();
        let mutation = controller.commit_edit(99).unwrap();
        assert_eq!(mutation.line_item_id, LineItemId(1));

        let mut fresh = two_weeks();
        fresh.push(purchase(
            3,
            "2024-01-15",
            vec![line(3, Some(10), LooseInt::Int(7), None)],
        ));
        controller.load(fresh);

        controller.fail_edit("HTTP 500");

        let matrix = controller.matrix();
        assert_eq!(matrix.columns[0].purchase_id, PurchaseId(2));
        let cell = matrix.cell(&key(10), 0).unwrap();
        assert_eq!(cell.line_item_id, Some(LineItemId(2)));
        assert_eq!(cell.quantity, Some(3));
    }

    #[test]
    fn test_confirm_after_reload_shows_accepted_value() {
        let mut controller = loaded();
        controller.begin_edit(&key(10), 1, EditField::Quantity).unwrap();
        controller.commit_edit(6).unwrap();

        controller.load(two_weeks());
        assert_eq!(controller.matrix().cell(&key(10), 1).unwrap().quantity, Some(3));

        let token = controller.confirm_edit().unwrap();
        assert_eq!(controller.matrix().cell(&key(10), 1).unwrap().quantity, Some(6));
        assert_eq!(controller.rebuild(Some(token)), RebuildOutcome::Suppressed);
    }

    #[test]
    fn test_set_column_limit_and_reset() {
        let mut controller = loaded();

        controller.set_column_limit(1);
        assert_eq!(controller.matrix().columns.len(), 1);

        controller.reset();
        assert!(controller.matrix().is_empty());
        assert!(controller.purchases().is_empty());
    }
}
