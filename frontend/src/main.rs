use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{
    attendance_list::AttendanceList,
    dashboard::Dashboard,
    header::Header,
    login_panel::LoginPanel,
    route_guard::{Page, RouteGuard},
    take_attendance::TakeAttendance,
    youth_management::YouthManagement,
};
use hooks::use_session::{use_session_manager, SessionHandle};

#[function_component(App)]
fn app() -> Html {
    let session = use_session_manager();
    let current_page = use_state(|| Page::Dashboard);

    let on_navigate = {
        let current_page = current_page.clone();
        Callback::from(move |page: Page| current_page.set(page))
    };

    // Back to the dashboard on sign-out so the next user starts there
    {
        let current_page = current_page.clone();
        use_effect_with(session.session.is_logged_in, move |is_logged_in| {
            if !*is_logged_in {
                current_page.set(Page::Dashboard);
            }
            || ()
        });
    }

    let page = *current_page;
    let content = match page {
        Page::Dashboard => html! { <Dashboard on_navigate={on_navigate.clone()} /> },
        Page::Youth => html! { <YouthManagement /> },
        Page::Attendance => html! { <AttendanceList /> },
        Page::TakeAttendance => html! { <TakeAttendance /> },
    };

    html! {
        <ContextProvider<SessionHandle> context={session.clone()}>
            <div class="app">
                <Header current_page={page} on_navigate={on_navigate} />
                <main class="main">
                    <div class="container">
                        if session.session.is_logged_in {
                            <RouteGuard capability={page.capability()}>
                                {content}
                            </RouteGuard>
                        } else {
                            <LoginPanel />
                        }
                    </div>
                </main>
            </div>
        </ContextProvider<SessionHandle>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
