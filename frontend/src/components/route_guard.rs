use shared::Capability;
use yew::prelude::*;

use crate::hooks::use_session::use_session;

/// Views reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Youth,
    Attendance,
    TakeAttendance,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Youth, Page::Attendance, Page::TakeAttendance];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Youth => "Youth",
            Page::Attendance => "Attendance",
            Page::TakeAttendance => "Take Attendance",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Page::Dashboard => Capability::ViewDashboard,
            Page::Youth => Capability::ManageYouth,
            Page::Attendance => Capability::ViewAttendance,
            Page::TakeAttendance => Capability::RecordAttendance,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    pub capability: Capability,
    #[prop_or_default]
    pub children: Children,
}

/// Renders its children only when the session holds `capability`
#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let session = use_session();

    if session.session.has_capability(props.capability) {
        html! { <>{ for props.children.iter() }</> }
    } else {
        html! {
            <div class="access-denied">
                <h2>{"Access denied"}</h2>
                <p>{"Your role does not have access to this page."}</p>
            </div>
        }
    }
}
