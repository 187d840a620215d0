//! Transient notifications, mostly for failed background requests such as a
//! like that had to be rolled back.

use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

const DEFAULT_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();
        match action {
            ToastAction::Add(toast) => state.toasts.push(toast),
            ToastAction::Remove(id) => state.toasts.retain(|t| t.id != id),
        }
        Rc::new(state)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    fn add(&self, message: String, kind: ToastKind) {
        let id = Uuid::new_v4();
        self.context
            .dispatch(ToastAction::Add(Toast { id, message, kind }));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DEFAULT_DURATION_MS).await;
            context.dispatch(ToastAction::Remove(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(message.into(), ToastKind::Error);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(message.into(), ToastKind::Success);
    }

    pub fn remove(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
