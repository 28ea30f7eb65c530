use shared::{AttendanceStatus, NO_ATTENDANCE_RECORDS};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_attendance_list::{use_attendance_list, UseAttendanceListResult};
use crate::hooks::use_session::use_session;

#[function_component(AttendanceList)]
pub fn attendance_list() -> Html {
    let session = use_session();
    let api_client = session.api_client();
    let UseAttendanceListResult { model, actions } = use_attendance_list(&api_client);

    let on_search = {
        let set_search_query = actions.set_search_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_search_query.emit(input.value());
        })
    };

    let on_refresh = {
        let refresh = actions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let phase = model.phase();
    // Tally covers every record, not just the ones matching the search
    let tally = model.tally();
    let rows = model.visible_rows();

    html! {
        <div class="attendance-list">
            <div class="view-header">
                <h2>{"Attendance Records"}</h2>
                <button class="btn btn-secondary" onclick={on_refresh} disabled={phase.is_loading()}>
                    {"Refresh Records"}
                </button>
            </div>

            <div class="status-tally">
                { for AttendanceStatus::ALL.into_iter().map(|status| html! {
                    <div class={classes!("tally-card", format!("status-{}", status.as_str()))}>
                        <span class="tally-label">{status.label()}</span>
                        <span class="tally-count">{tally.count(status)}</span>
                    </div>
                }) }
                <div class="tally-card tally-total">
                    <span class="tally-label">{"Total"}</span>
                    <span class="tally-count">{tally.total()}</span>
                </div>
            </div>

            <input
                type="search"
                class="search-input"
                placeholder="Search by first or last name"
                value={model.search_query().to_string()}
                oninput={on_search}
            />

            if phase.is_loading() {
                <p class="loading">{"Loading..."}</p>
            }
            if let Some(error) = model.error() {
                <div class="error-message">{error.to_string()}</div>
            }

            <table class="attendance-table">
                <thead>
                    <tr>
                        <th>{"First Name"}</th>
                        <th>{"Last Name"}</th>
                        <th>{"Status"}</th>
                        <th>{"Date"}</th>
                    </tr>
                </thead>
                <tbody>
                    if rows.is_empty() {
                        <tr>
                            <td colspan="4" class="empty-row">{NO_ATTENDANCE_RECORDS}</td>
                        </tr>
                    } else {
                        { for rows.iter().map(|row| html! {
                            <tr key={row.id.clone()}>
                                <td>{row.youth_first_name.clone()}</td>
                                <td>{row.youth_last_name.clone()}</td>
                                <td class={format!("status-{}", row.status.as_str())}>{row.status.label()}</td>
                                <td>{row.display_date()}</td>
                            </tr>
                        }) }
                    }
                </tbody>
            </table>
        </div>
    }
}
