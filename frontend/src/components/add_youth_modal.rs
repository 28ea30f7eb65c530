use std::rc::Rc;

use shared::{AddYouthDialogModel, YouthField};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, Default, PartialEq)]
struct DialogState(AddYouthDialogModel);

enum DialogAction {
    Reset(String),
    SetField(YouthField, String),
    BeginSubmit,
    FinishSubmit(Result<(), String>),
}

impl Reducible for DialogState {
    type Action = DialogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.0.clone();
        match action {
            DialogAction::Reset(user_id) => model = AddYouthDialogModel::new(user_id),
            DialogAction::SetField(field, value) => model.set_field(field, value),
            DialogAction::BeginSubmit => {
                model.begin_submit();
            }
            DialogAction::FinishSubmit(result) => {
                model.finish_submit(result);
            }
        }
        Rc::new(Self(model))
    }
}

#[derive(Properties, PartialEq)]
pub struct AddYouthModalProps {
    pub is_open: bool,
    pub user_id: String,
    pub api_client: ApiClient,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(AddYouthModal)]
pub fn add_youth_modal(props: &AddYouthModalProps) -> Html {
    let dialog = use_reducer(DialogState::default);

    // Reset state when modal opens
    {
        let dispatcher = dialog.dispatcher();
        use_effect_with((props.is_open, props.user_id.clone()), move |(is_open, user_id)| {
            if *is_open {
                dispatcher.dispatch(DialogAction::Reset(user_id.clone()));
            }
            || ()
        });
    }

    let on_submit = {
        let dialog = dialog.clone();
        let api_client = props.api_client.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            // Same check the reducer runs; tells us whether to hit the network
            let mut preview = dialog.0.clone();
            let request = preview.begin_submit();
            dialog.dispatch(DialogAction::BeginSubmit);

            let Some(request) = request else {
                return;
            };

            let dispatcher = dialog.dispatcher();
            let api_client = api_client.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                let result = api_client.create_youth(&request).await.map(|youth| {
                    Logger::info_with_component("AddYouthModal", &format!("Created youth {}", youth.id));
                });
                if let Err(e) = &result {
                    Logger::warn_with_component("AddYouthModal", &format!("Create youth failed: {}", e));
                }

                let succeeded = result.is_ok();
                dispatcher.dispatch(DialogAction::FinishSubmit(result));
                if succeeded {
                    on_success.emit(());
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    let model = &dialog.0;
    let is_submitting = model.is_submitting();

    let fields = YouthField::ALL.into_iter().map(|field| {
        let dispatcher = dialog.dispatcher();
        let on_change = Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(DialogAction::SetField(field, input.value()));
        });
        let id = format!("youth-{}", field.name());
        html! {
            <div class="form-group">
                <label for={id.clone()}>{field.label()}</label>
                <input
                    id={id}
                    name={field.name()}
                    type={field.input_type()}
                    class="add-youth-input"
                    placeholder={field.placeholder()}
                    value={model.form.get(field).to_string()}
                    onchange={on_change}
                    disabled={is_submitting}
                />
            </div>
        }
    });

    html! {
        <div class="add-youth-modal-backdrop" onclick={on_backdrop_click}>
            <div class="add-youth-modal" onclick={on_modal_click}>
                <div class="add-youth-modal-content">
                    <h3 class="add-youth-title">{"Add Youth"}</h3>

                    if let Some(error) = model.error() {
                        <div class="add-youth-error">{error.to_string()}</div>
                    }

                    <form class="add-youth-form" onsubmit={on_submit}>
                        { for fields }

                        <div class="add-youth-buttons">
                            <button type="submit" class="btn btn-primary" disabled={is_submitting}>
                                {if is_submitting { "Saving..." } else { "Add Youth" }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-secondary"
                                onclick={on_cancel}
                                disabled={is_submitting}
                            >
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
