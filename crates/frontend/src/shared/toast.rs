//! Short-lived notifications.
//!
//! `ToastService` lives in context; any component pushes messages through it
//! and `<Toaster />` renders the queue. Each toast removes itself after the
//! configured delay.

use contracts::shared::purchase_matrix::{MatrixError, Severity};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::config::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }
}

impl From<Severity> for ToastKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => ToastKind::Warning,
            Severity::Error => ToastKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        self.toasts.update(|toasts| toasts.push(toast));

        let this = *self;
        let delay = config().toast.dismiss_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            this.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(ToastKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    /// Report a matrix error with the kind its severity calls for
    pub fn matrix_error(&self, error: &MatrixError) {
        self.show(error.severity().into(), error.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn Toaster() -> impl IntoView {
    let service = use_toast();

    view! {
        <div class="toaster">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| service.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
