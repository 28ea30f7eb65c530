use std::rc::Rc;

use shared::{AgeBucket, Youth, YouthManagementModel, YOUTH_FETCH_FAILED};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, Default, PartialEq)]
pub struct YouthManagementState(pub YouthManagementModel);

pub enum YouthManagementAction {
    BeginFetch,
    YouthLoaded(Result<Vec<Youth>, String>),
    SelectBucket(AgeBucket),
    SetSearchQuery(String),
    ToggleDialog,
    YouthCreated,
}

impl Reducible for YouthManagementState {
    type Action = YouthManagementAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.0.clone();
        match action {
            YouthManagementAction::BeginFetch => model.begin_fetch(),
            YouthManagementAction::YouthLoaded(result) => model.youth_loaded(result),
            YouthManagementAction::SelectBucket(bucket) => model.select_bucket(bucket),
            YouthManagementAction::SetSearchQuery(query) => model.set_search_query(query),
            YouthManagementAction::ToggleDialog => model.toggle_dialog(),
            YouthManagementAction::YouthCreated => model.youth_created(),
        }
        Rc::new(Self(model))
    }
}

pub struct UseYouthManagementResult {
    pub model: YouthManagementModel,
    pub actions: UseYouthManagementActions,
}

#[derive(Clone, PartialEq)]
pub struct UseYouthManagementActions {
    pub select_bucket: Callback<AgeBucket>,
    pub set_search_query: Callback<String>,
    pub toggle_dialog: Callback<()>,
    pub youth_created: Callback<()>,
}

#[hook]
pub fn use_youth_management(api_client: &ApiClient) -> UseYouthManagementResult {
    let state = use_reducer(YouthManagementState::default);
    let refresh_trigger = state.0.refresh_trigger();

    {
        let dispatcher = state.dispatcher();
        use_effect_with((refresh_trigger, api_client.clone()), move |(_, api_client)| {
            dispatcher.dispatch(YouthManagementAction::BeginFetch);

            let api_client = api_client.clone();
            spawn_local(async move {
                let result = api_client.get_youth().await.map_err(|e| {
                    Logger::error_with_component("YouthManagement", &format!("Youth fetch failed: {}", e));
                    YOUTH_FETCH_FAILED.to_string()
                });
                dispatcher.dispatch(YouthManagementAction::YouthLoaded(result));
            });

            || ()
        });
    }

    let select_bucket = {
        let dispatcher = state.dispatcher();
        use_callback((), move |bucket: AgeBucket, _| {
            dispatcher.dispatch(YouthManagementAction::SelectBucket(bucket));
        })
    };

    let set_search_query = {
        let dispatcher = state.dispatcher();
        use_callback((), move |query: String, _| {
            dispatcher.dispatch(YouthManagementAction::SetSearchQuery(query));
        })
    };

    let toggle_dialog = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(YouthManagementAction::ToggleDialog);
        })
    };

    let youth_created = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(YouthManagementAction::YouthCreated);
        })
    };

    UseYouthManagementResult {
        model: state.0.clone(),
        actions: UseYouthManagementActions {
            select_bucket,
            set_search_query,
            toggle_dialog,
            youth_created,
        },
    }
}
