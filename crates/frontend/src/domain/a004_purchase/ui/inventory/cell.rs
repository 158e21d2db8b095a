//! Editable figure of the inventory matrix.
//!
//! Click focuses the cell (`begin_edit`), Enter or blur saves it, Escape
//! drops the edit. Saving applies the value optimistically, sends the
//! mutation and then confirms or rolls back.

use contracts::shared::numeric::parse_cell_input;
use contracts::shared::purchase_matrix::{
    display_value, CellRef, EditField, EditState, MatrixController, ProductKey,
};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::InventoryState;
use crate::domain::a004_purchase::api;
use crate::shared::toast::use_toast;

/// What the cell shows right now
#[derive(Debug, Clone, PartialEq)]
enum CellMode {
    Display(String),
    Editing,
    Saving(String),
}

fn cell_mode(controller: &MatrixController, cell: &CellRef) -> CellMode {
    let value = controller
        .matrix()
        .cell(&cell.key, cell.column)
        .and_then(|c| c.value(cell.field));
    match controller.state() {
        EditState::Editing(active) if active == cell => CellMode::Editing,
        EditState::Saving(pending) if &pending.cell == cell => CellMode::Saving(display_value(value)),
        _ => CellMode::Display(display_value(value)),
    }
}

#[component]
pub fn EditableCell(
    state: InventoryState,
    row_key: ProductKey,
    column: usize,
    field: EditField,
) -> impl IntoView {
    let toast = use_toast();
    let cell = CellRef {
        key: row_key,
        column,
        field,
    };
    let cell = StoredValue::new(cell);
    let input_ref = NodeRef::<html::Input>::new();

    let mode = Memo::new(move |_| {
        state
            .controller
            .with(|controller| cell.with_value(|c| cell_mode(controller, c)))
    });

    let begin = move || {
        let result = state.controller.try_update(|controller| {
            cell.with_value(|c| controller.begin_edit(&c.key, c.column, c.field))
        });
        match result {
            Some(Ok(current)) => {
                state
                    .draft
                    .set(current.map(|v| v.to_string()).unwrap_or_default());
            }
            Some(Err(e)) => toast.matrix_error(&e),
            None => {}
        }
    };

    let commit = move || {
        // Blur after Enter or Escape arrives when the cell is no longer focused
        let focused = state.controller.with_untracked(|controller| {
            matches!(controller.state(), EditState::Editing(active) if cell.with_value(|c| c == active))
        });
        if !focused {
            return;
        }

        let value = parse_cell_input(&state.draft.get_untracked());
        let unchanged = state.controller.with_untracked(|controller| {
            cell.with_value(|c| {
                controller
                    .matrix()
                    .cell(&c.key, c.column)
                    .map(|current| current.value(c.field) == Some(value))
                    .unwrap_or(false)
            })
        });
        if unchanged {
            state.controller.update(|controller| controller.cancel_edit());
            return;
        }

        let mutation = match state
            .controller
            .try_update(|controller| controller.commit_edit(value))
        {
            Some(Ok(mutation)) => mutation,
            Some(Err(e)) => {
                toast.matrix_error(&e);
                return;
            }
            None => return,
        };

        spawn_local(async move {
            match api::patch_line_item(mutation.line_item_id, &mutation.patch).await {
                Ok(saved) => {
                    if saved.id != mutation.line_item_id {
                        log::warn!("edit of {} answered with {}", mutation.line_item_id, saved.id);
                    }
                    let confirmed = state
                        .controller
                        .try_update(|controller| controller.confirm_edit());
                    match confirmed {
                        Some(Ok(token)) => {
                            state.defer_suppression(token);
                            toast.success("Actualizado");
                        }
                        Some(Err(e)) => log::warn!("confirmation without pending edit: {}", e),
                        None => {}
                    }
                }
                Err(reason) => {
                    if let Some(error) = state
                        .controller
                        .try_update(|controller| controller.fail_edit(reason))
                    {
                        toast.matrix_error(&error);
                    }
                }
            }
        });
    };

    let cancel = move || state.controller.update(|controller| controller.cancel_edit());

    Effect::new(move |_| {
        if mode.get() == CellMode::Editing {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
                input.select();
            }
        }
    });

    let field_class = match field {
        EditField::Quantity => "matrix-cell matrix-cell--quantity",
        EditField::PreviousInventory => "matrix-cell matrix-cell--inventory",
    };

    view! {
        <div class=field_class>
            {move || match mode.get() {
                CellMode::Editing => view! {
                    <input
                        node_ref=input_ref
                        type="number"
                        class="matrix-cell__input"
                        prop:value=move || state.draft.get()
                        on:input=move |ev| state.draft.set(event_target_value(&ev))
                        on:keydown=move |ev| match ev.key().as_str() {
                            "Enter" => commit(),
                            "Escape" => cancel(),
                            _ => {}
                        }
                        on:blur=move |_| commit()
                    />
                }.into_any(),
                CellMode::Saving(text) => view! {
                    <span class="matrix-cell__value matrix-cell__value--saving">{text}</span>
                }.into_any(),
                CellMode::Display(text) => view! {
                    <span class="matrix-cell__value" on:click=move |_| begin()>{text}</span>
                }.into_any(),
            }}
        </div>
    }
}
