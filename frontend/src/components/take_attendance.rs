use std::rc::Rc;

use shared::{
    attendance_saved_message, AttendanceSheet, AttendanceStatus, FetchPhase, Youth,
    YOUTH_FETCH_FAILED,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::use_session;
use crate::services::date_utils::get_current_date;
use crate::services::logging::Logger;

#[derive(Clone, Default, PartialEq)]
struct SheetState(AttendanceSheet);

enum SheetAction {
    SetDate(String),
    Toggle(String, AttendanceStatus),
    ClearMarks,
}

impl Reducible for SheetState {
    type Action = SheetAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut sheet = self.0.clone();
        match action {
            SheetAction::SetDate(date) => sheet.set_date(date),
            SheetAction::Toggle(youth_id, status) => sheet.toggle(&youth_id, status),
            SheetAction::ClearMarks => sheet.clear_marks(),
        }
        Rc::new(Self(sheet))
    }
}

#[derive(Clone, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

/// Mark each youth present, absent or saved for one date and submit the
/// marked rows in a single request
#[function_component(TakeAttendance)]
pub fn take_attendance() -> Html {
    let session = use_session();
    let api_client = session.api_client();
    let youths = use_state(Vec::<Youth>::new);
    let phase = use_state(FetchPhase::default);
    let sheet = use_reducer(|| SheetState(AttendanceSheet::new(get_current_date())));
    let notice = use_state(|| Option::<Notice>::None);
    let submitting = use_state(|| false);

    {
        let youths = youths.clone();
        let phase = phase.clone();
        use_effect_with(api_client.clone(), move |api_client| {
            phase.set(FetchPhase::Loading);
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.get_youth().await {
                    Ok(list) => {
                        youths.set(list);
                        phase.set(FetchPhase::Success);
                    }
                    Err(e) => {
                        Logger::error_with_component("TakeAttendance", &format!("Youth fetch failed: {}", e));
                        phase.set(FetchPhase::Error(YOUTH_FETCH_FAILED.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_date_change = {
        let dispatcher = sheet.dispatcher();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(SheetAction::SetDate(input.value()));
        })
    };

    let on_submit = {
        let sheet = sheet.clone();
        let youths = youths.clone();
        let notice = notice.clone();
        let submitting = submitting.clone();
        let api_client = api_client.clone();
        Callback::from(move |_: MouseEvent| {
            if *submitting {
                return;
            }
            let records = match sheet.0.submission(&*youths) {
                Ok(records) => records,
                Err(e) => {
                    notice.set(Some(Notice::Error(e.to_string())));
                    return;
                }
            };

            submitting.set(true);
            notice.set(None);

            let dispatcher = sheet.dispatcher();
            let notice = notice.clone();
            let submitting = submitting.clone();
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.submit_attendance(&records).await {
                    Ok(saved) => {
                        Logger::info_with_component("TakeAttendance", &format!("Saved {} records", saved.len()));
                        notice.set(Some(Notice::Success(attendance_saved_message(saved.len()))));
                        dispatcher.dispatch(SheetAction::ClearMarks);
                    }
                    Err(e) => {
                        Logger::warn_with_component("TakeAttendance", &format!("Submit failed: {}", e));
                        notice.set(Some(Notice::Error(e)));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let rows = youths.iter().map(|youth| {
        let current = sheet.0.status_of(&youth.id);
        let buttons = AttendanceStatus::ALL.into_iter().map(|status| {
            let dispatcher = sheet.dispatcher();
            let youth_id = youth.id.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                dispatcher.dispatch(SheetAction::Toggle(youth_id.clone(), status));
            });
            html! {
                <button
                    class={classes!("btn", "mark-button", format!("status-{}", status.as_str()), (current == Some(status)).then_some("selected"))}
                    {onclick}
                >
                    {status.label()}
                </button>
            }
        });
        html! {
            <tr key={youth.id.clone()}>
                <td>{youth.full_name()}</td>
                <td class="mark-buttons">{ for buttons }</td>
            </tr>
        }
    });

    html! {
        <div class="take-attendance">
            <div class="view-header">
                <h2>{"Take Attendance"}</h2>
                <input type="date" value={sheet.0.date().to_string()} onchange={on_date_change} />
            </div>

            if let Some(notice) = (*notice).clone() {
                {match notice {
                    Notice::Success(message) => html! { <div class="success-message">{message}</div> },
                    Notice::Error(message) => html! { <div class="error-message">{message}</div> },
                }}
            }
            if phase.is_loading() {
                <p class="loading">{"Loading..."}</p>
            }
            if let Some(error) = phase.error() {
                <div class="error-message">{error.to_string()}</div>
            }

            <table class="take-attendance-table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Mark"}</th>
                    </tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>

            <button class="btn btn-primary" onclick={on_submit} disabled={*submitting}>
                {if *submitting {
                    "Saving...".to_string()
                } else {
                    format!("Submit Attendance ({})", sheet.0.marked_count())
                }}
            </button>
        </div>
    }
}
