use yew::prelude::*;

use super::route_guard::Page;
use crate::hooks::use_session::use_session;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_page: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let session = use_session();

    let on_logout = {
        let logout = session.logout.clone();
        Callback::from(move |_: MouseEvent| logout.emit(()))
    };

    // Pages the role cannot open are left out of the navigation
    let nav_items = Page::ALL
        .into_iter()
        .filter(|page| session.session.has_capability(page.capability()))
        .map(|page| {
            let on_navigate = props.on_navigate.clone();
            let class = if page == props.current_page { "nav-link active" } else { "nav-link" };
            html! {
                <button class={class} onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(page))}>
                    {page.label()}
                </button>
            }
        });

    html! {
        <header class="header">
            <div class="container">
                <h1>{"NetCompassion"}</h1>
                if session.session.is_logged_in {
                    <>
                        <nav class="nav">{ for nav_items }</nav>
                        <div class="header-right">
                            <span class="user-name">
                                {session.session.name.clone().unwrap_or_default()}
                            </span>
                            <button class="btn btn-secondary" onclick={on_logout}>{"Log out"}</button>
                        </div>
                    </>
                }
            </div>
        </header>
    }
}
