use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline error for a widget whose feed failed.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::warn!("Widget shows error: {}", props.message);

    html! {
        <div class="flex flex-col items-center justify-center h-full gap-2">
            <div class="alert alert-error text-sm">
                <i class="fas fa-exclamation-circle"></i>
                <span>{&props.message}</span>
            </div>
            if let Some(on_retry) = props.on_retry.clone() {
                <button
                    class="btn btn-primary btn-xs"
                    onclick={Callback::from(move |_| {
                        log::debug!("User clicked retry button");
                        on_retry.emit(());
                    })}
                >
                    <i class="fas fa-redo"></i>
                    {" Retry"}
                </button>
            }
        </div>
    }
}
