use shared::{LoginDetails, Role};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_session::use_session;

/// Stand-in for the external sign-in step: collects the identity and role
/// and starts a session
#[function_component(LoginPanel)]
pub fn login_panel() -> Html {
    let session = use_session();
    let user_id = use_state(String::new);
    let name = use_state(String::new);
    let role = use_state(|| Role::Pcd);
    let error_message = use_state(|| Option::<String>::None);

    let on_user_id_change = {
        let user_id = user_id.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            user_id.set(input.value());
        })
    };

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(selected) = select.value().parse::<Role>() {
                role.set(selected);
            }
        })
    };

    let on_submit = {
        let user_id = user_id.clone();
        let name = name.clone();
        let role = role.clone();
        let error_message = error_message.clone();
        let login = session.login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let user_id = user_id.trim().to_string();
            let name = name.trim().to_string();
            if user_id.is_empty() || name.is_empty() {
                error_message.set(Some("Enter your staff ID and name.".to_string()));
                return;
            }

            error_message.set(None);
            login.emit(LoginDetails {
                user_id,
                name,
                role: *role,
            });
        })
    };

    html! {
        <div class="login-panel">
            <h2>{"Sign in"}</h2>

            if let Some(error) = (*error_message).clone() {
                <div class="form-error">{error}</div>
            }

            <form class="login-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="login-user-id">{"Staff ID"}</label>
                    <input
                        id="login-user-id"
                        type="text"
                        value={(*user_id).clone()}
                        onchange={on_user_id_change}
                    />
                </div>
                <div class="form-group">
                    <label for="login-name">{"Name"}</label>
                    <input
                        id="login-name"
                        type="text"
                        value={(*name).clone()}
                        onchange={on_name_change}
                    />
                </div>
                <div class="form-group">
                    <label for="login-role">{"Role"}</label>
                    <select id="login-role" onchange={on_role_change}>
                        { for Role::ALL.into_iter().map(|option| html! {
                            <option value={option.as_str()} selected={option == *role}>
                                {option.as_str().to_uppercase()}
                            </option>
                        }) }
                    </select>
                </div>
                <button type="submit" class="btn btn-primary">{"Sign in"}</button>
            </form>
        </div>
    }
}
