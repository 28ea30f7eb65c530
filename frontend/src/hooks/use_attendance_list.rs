use std::rc::Rc;

use shared::{
    AttendanceListModel, AttendanceRecord, Youth, ATTENDANCE_FETCH_FAILED, YOUTH_FETCH_FAILED,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Reducer wrapper so the two concurrent fetches each apply their own
/// result to the latest state
#[derive(Clone, Default, PartialEq)]
pub struct AttendanceListState(pub AttendanceListModel);

pub enum AttendanceListAction {
    BeginRefresh,
    RequestRefresh,
    AttendanceLoaded(Result<Vec<AttendanceRecord>, String>),
    YouthLoaded(Result<Vec<Youth>, String>),
    SetSearchQuery(String),
}

impl Reducible for AttendanceListState {
    type Action = AttendanceListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.0.clone();
        match action {
            AttendanceListAction::BeginRefresh => model.begin_refresh(),
            AttendanceListAction::RequestRefresh => model.request_refresh(),
            AttendanceListAction::AttendanceLoaded(result) => model.attendance_loaded(result),
            AttendanceListAction::YouthLoaded(result) => model.youth_loaded(result),
            AttendanceListAction::SetSearchQuery(query) => model.set_search_query(query),
        }
        Rc::new(Self(model))
    }
}

pub struct UseAttendanceListResult {
    pub model: AttendanceListModel,
    pub actions: UseAttendanceListActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAttendanceListActions {
    pub refresh: Callback<()>,
    pub set_search_query: Callback<String>,
}

#[hook]
pub fn use_attendance_list(api_client: &ApiClient) -> UseAttendanceListResult {
    let state = use_reducer(AttendanceListState::default);
    let refresh_counter = state.0.refresh_counter();

    // Fetch both lists on mount and on every refresh
    {
        let dispatcher = state.dispatcher();
        use_effect_with((refresh_counter, api_client.clone()), move |(counter, api_client)| {
            Logger::debug_with_component("AttendanceList", &format!("Loading records (refresh {})", counter));
            dispatcher.dispatch(AttendanceListAction::BeginRefresh);

            let attendance_client = api_client.clone();
            let attendance_dispatcher = dispatcher.clone();
            spawn_local(async move {
                let result = attendance_client.get_attendance().await.map_err(|e| {
                    Logger::error_with_component("AttendanceList", &format!("Attendance fetch failed: {}", e));
                    ATTENDANCE_FETCH_FAILED.to_string()
                });
                attendance_dispatcher.dispatch(AttendanceListAction::AttendanceLoaded(result));
            });

            let youth_client = api_client.clone();
            spawn_local(async move {
                let result = youth_client.get_youth().await.map_err(|e| {
                    Logger::error_with_component("AttendanceList", &format!("Youth fetch failed: {}", e));
                    YOUTH_FETCH_FAILED.to_string()
                });
                dispatcher.dispatch(AttendanceListAction::YouthLoaded(result));
            });

            || ()
        });
    }

    let refresh = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(AttendanceListAction::RequestRefresh);
        })
    };

    let set_search_query = {
        let dispatcher = state.dispatcher();
        use_callback((), move |query: String, _| {
            dispatcher.dispatch(AttendanceListAction::SetSearchQuery(query));
        })
    };

    UseAttendanceListResult {
        model: state.0.clone(),
        actions: UseAttendanceListActions {
            refresh,
            set_search_query,
        },
    }
}
