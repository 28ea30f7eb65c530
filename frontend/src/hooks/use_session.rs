use shared::{LoginDetails, Session, SessionManager};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session_storage::BrowserSessionStorage;

/// The signed-in session plus the actions that change it. Provided once by
/// the app through a `ContextProvider`.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    pub session: Session,
    pub login: Callback<LoginDetails>,
    pub logout: Callback<()>,
}

impl SessionHandle {
    /// API client that sends this session's role
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new().with_role(self.session.active_role())
    }
}

/// Restore the stored session once and expose login/logout
#[hook]
pub fn use_session_manager() -> SessionHandle {
    let manager = use_mut_ref(|| SessionManager::restore(BrowserSessionStorage));
    let session = use_state(|| manager.borrow().session().clone());

    let login = {
        let manager = manager.clone();
        let session = session.clone();
        use_callback((), move |details: LoginDetails, _| {
            Logger::info_with_component(
                "Session",
                &format!("Signed in as {} ({})", details.user_id, details.role),
            );
            let updated = manager.borrow_mut().login(details).clone();
            session.set(updated);
        })
    };

    let logout = {
        let manager = manager.clone();
        let session = session.clone();
        use_callback((), move |_, _| {
            Logger::info_with_component("Session", "Signed out");
            manager.borrow_mut().logout();
            session.set(Session::logged_out());
        })
    };

    SessionHandle {
        session: (*session).clone(),
        login,
        logout,
    }
}

/// Session from the nearest provider; logged out when there is none
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().unwrap_or_else(|| SessionHandle {
        session: Session::logged_out(),
        login: Callback::noop(),
        logout: Callback::noop(),
    })
}
