use std::rc::Rc;

use engine::Notice;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::settings::get_settings;

/// At most this many toasts are on screen; older ones make room.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn alert_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Warning => "alert-warning",
            Severity::Error => "alert-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "fas fa-info-circle",
            Severity::Success => "fas fa-check-circle",
            Severity::Warning => "fas fa-exclamation-triangle",
            Severity::Error => "fas fa-exclamation-circle",
        }
    }
}

/// Lost writes are errors; a restored default or a degraded placement is a warning.
impl From<&Notice> for Severity {
    fn from(notice: &Notice) -> Self {
        match notice {
            Notice::PersistenceWrite { .. } => Severity::Error,
            Notice::PersistenceRead { .. } | Notice::PlacementDegraded { .. } => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub severity: Severity,
    /// How often the same message arrived back to back.
    pub repeats: u32,
}

pub enum ToastAction {
    Push { id: usize, message: String, severity: Severity },
    Dismiss(usize),
}

/// The toasts currently on screen, newest last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Adds a toast under `id`. A repeat of the newest message takes over the
    /// new id, so its dismissal timer starts again.
    pub fn push(&mut self, id: usize, message: String, severity: Severity) {
        if let Some(last) = self
            .toasts
            .last_mut()
            .filter(|t| t.message == message && t.severity == severity)
        {
            last.id = id;
            last.repeats += 1;
            return;
        }
        self.toasts.push(Toast {
            id,
            message,
            severity,
            repeats: 1,
        });
        if self.toasts.len() > MAX_VISIBLE {
            let overflow = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..overflow);
        }
    }

    pub fn dismiss(&mut self, id: usize) {
        self.toasts.retain(|t| t.id != id);
    }
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push { id, message, severity } => next.push(id, message, severity),
            ToastAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    push: Callback<(String, Severity)>,
}

impl ToastContext {
    pub fn show_info(&self, message: String) {
        self.push.emit((message, Severity::Info));
    }

    pub fn show_success(&self, message: String) {
        self.push.emit((message, Severity::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.push.emit((message, Severity::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.push.emit((message, Severity::Error));
    }

    pub fn show_notice(&self, notice: &Notice) {
        self.push.emit((notice.to_string(), Severity::from(notice)));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_mut_ref(|| 0usize);

    let push = {
        let dispatcher = queue.dispatcher();
        Callback::from(move |(message, severity): (String, Severity)| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            dispatcher.dispatch(ToastAction::Push { id, message, severity });

            let dispatcher = dispatcher.clone();
            Timeout::new(get_settings().toast_duration_ms, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    html! {
        <ContextProvider<ToastContext> context={ToastContext { push }}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.toasts().iter().map(|toast| {
                    let on_close = {
                        let dispatcher = queue.dispatcher();
                        let id = toast.id;
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={toast.id} class={classes!("alert", toast.severity.alert_class(), "shadow-lg")}>
                            <i class={toast.severity.icon()}></i>
                            <span>{&toast.message}</span>
                            if toast.repeats > 1 {
                                <span class="badge badge-sm">{format!("x{}", toast.repeats)}</span>
                            }
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
