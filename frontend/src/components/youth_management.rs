use gloo::timers::future::TimeoutFuture;
use shared::{age_in_year, format_display_date, AgeBucket, YOUTH_ADDED_MESSAGE};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::add_youth_modal::AddYouthModal;
use crate::hooks::use_session::use_session;
use crate::hooks::use_youth_management::{use_youth_management, UseYouthManagementResult};
use crate::services::date_utils::current_year;

#[function_component(YouthManagement)]
pub fn youth_management() -> Html {
    let session = use_session();
    let api_client = session.api_client();
    let UseYouthManagementResult { model, actions } = use_youth_management(&api_client);
    let success_message = use_state(|| Option::<String>::None);

    let on_search = {
        let set_search_query = actions.set_search_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_search_query.emit(input.value());
        })
    };

    let on_toggle_dialog = {
        let toggle_dialog = actions.toggle_dialog.clone();
        Callback::from(move |_: MouseEvent| toggle_dialog.emit(()))
    };

    let on_youth_created = {
        let youth_created = actions.youth_created.clone();
        let success_message = success_message.clone();
        Callback::from(move |_: ()| {
            youth_created.emit(());
            success_message.set(Some(YOUTH_ADDED_MESSAGE.to_string()));

            // Clear success message after 3 seconds
            let success_message = success_message.clone();
            spawn_local(async move {
                TimeoutFuture::new(3000).await;
                success_message.set(None);
            });
        })
    };

    let year = current_year();
    let phase = model.phase();
    let active_bucket = model.filter.active_bucket();
    let visible = model.visible(year);

    let bucket_buttons = AgeBucket::ALL.into_iter().map(|bucket| {
        let select_bucket = actions.select_bucket.clone();
        let class = if active_bucket == Some(bucket) {
            "btn age-filter active"
        } else {
            "btn age-filter"
        };
        html! {
            <button class={class} onclick={Callback::from(move |_: MouseEvent| select_bucket.emit(bucket))}>
                {bucket.label()}
            </button>
        }
    });

    html! {
        <div class="youth-management">
            <div class="view-header">
                <h2>{"Youth"}</h2>
                <button class="btn btn-primary" onclick={on_toggle_dialog}>{"Add Youth"}</button>
            </div>

            if let Some(message) = (*success_message).clone() {
                <div class="success-message">{message}</div>
            }

            <div class="age-filters">{ for bucket_buttons }</div>

            <input
                type="search"
                class="search-input"
                placeholder="Search by first or last name"
                value={model.filter.query.clone()}
                oninput={on_search}
            />

            if phase.is_loading() {
                <p class="loading">{"Loading..."}</p>
            }
            if let Some(error) = phase.error() {
                <div class="error-message">{error.to_string()}</div>
            }

            <p class="result-count">
                {format!("Showing {} of {} youth", visible.len(), model.youths().len())}
            </p>

            <table class="youth-table">
                <thead>
                    <tr>
                        <th>{"First Name"}</th>
                        <th>{"Last Name"}</th>
                        <th>{"Age"}</th>
                        <th>{"Birthday"}</th>
                        <th>{"Address"}</th>
                        <th>{"Education Level"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for visible.iter().map(|youth| html! {
                        <tr key={youth.id.clone()}>
                            <td>{youth.first_name.clone()}</td>
                            <td>{youth.last_name.clone()}</td>
                            <td>{age_in_year(&youth.birthday, year).map(|age| age.to_string()).unwrap_or_default()}</td>
                            <td>{format_display_date(&youth.birthday)}</td>
                            <td>{youth.address.clone()}</td>
                            <td>{youth.education_level.clone()}</td>
                        </tr>
                    }) }
                </tbody>
            </table>

            <AddYouthModal
                is_open={model.is_dialog_open()}
                user_id={session.session.user_id.clone().unwrap_or_default()}
                api_client={api_client.clone()}
                on_success={on_youth_created}
                on_close={actions.toggle_dialog.clone()}
            />
        </div>
    }
}
