use yew::prelude::*;

use super::route_guard::Page;
use crate::hooks::use_session::use_session;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub on_navigate: Callback<Page>,
}

/// Landing view after sign-in: greets the user and links to the pages the
/// role can open
#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let session = use_session();
    let name = session.session.name.clone().unwrap_or_default();
    let role = session
        .session
        .active_role()
        .map(|role| role.to_string())
        .unwrap_or_default();

    let shortcuts = Page::ALL
        .into_iter()
        .filter(|page| *page != Page::Dashboard)
        .filter(|page| session.session.has_capability(page.capability()))
        .map(|page| {
            let on_navigate = props.on_navigate.clone();
            html! {
                <button class="btn btn-secondary dashboard-link" onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(page))}>
                    {page.label()}
                </button>
            }
        });

    html! {
        <div class="dashboard">
            <h2>{format!("Welcome, {}", name)}</h2>
            <p class="dashboard-role">{format!("Signed in as {}", role)}</p>
            <div class="dashboard-links">{ for shortcuts }</div>
        </div>
    }
}
