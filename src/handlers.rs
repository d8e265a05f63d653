use crate::calendar::YearMonth;
use crate::errors::AppError;
use crate::models::{
    CalendarParams, CalendarResponse, EditRequest, EditResponse, GoalRequest, SearchParams,
    WidgetSnapshot,
};
use crate::search::search_url;
use crate::state::AppState;
use crate::ticker::{TICK_INTERVAL, snapshot_stream};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{
        Html, IntoResponse, Redirect, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use chrono::Local;
use futures::{Stream, StreamExt};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let month = state.current_month();
    let snapshot = state.snapshot().await;
    let calendar = state.calendar(month).await;
    Html(render_index(&snapshot, &calendar))
}

pub async fn get_widget(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    Json(state.snapshot().await)
}

pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("ticker subscriber connected");
    let events = snapshot_stream(state, TICK_INTERVAL)
        .map(|snapshot| Event::default().event("tick").json_data(snapshot));
    Sse::new(events).keep_alive(KeepAlive::default())
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<CalendarResponse>, AppError> {
    let current = state.current_month();
    let month = YearMonth::new(
        params.year.unwrap_or(current.year),
        params.month.unwrap_or(current.month as i32),
    );
    if month.first_day().is_none() {
        return Err(AppError::bad_request("month is outside the supported range"));
    }

    Ok(Json(state.calendar(month).await))
}

pub async fn edit(
    State(state): State<AppState>,
    Json(draft): Json<EditRequest>,
) -> Json<EditResponse> {
    let saved = state.widget.lock().await.save_edit(&draft, &Local).await;
    Json(EditResponse {
        saved,
        widget: state.snapshot().await,
    })
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Json<WidgetSnapshot> {
    state.widget.lock().await.set_goal(payload.goal).await;
    Json(state.snapshot().await)
}

pub async fn reset(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    apply_reset(&state).await;
    Json(state.snapshot().await)
}

pub async fn edit_open(State(state): State<AppState>) -> Redirect {
    state.widget.lock().await.open_editor(&Local);
    Redirect::to("/")
}

pub async fn edit_save(State(state): State<AppState>, Form(draft): Form<EditRequest>) -> Redirect {
    state.widget.lock().await.save_edit(&draft, &Local).await;
    Redirect::to("/")
}

pub async fn edit_cancel(State(state): State<AppState>) -> Redirect {
    state.widget.lock().await.cancel_edit(&Local);
    Redirect::to("/")
}

pub async fn goal_form(State(state): State<AppState>, Form(payload): Form<GoalRequest>) -> Redirect {
    state.widget.lock().await.set_goal(payload.goal).await;
    Redirect::to("/")
}

pub async fn reset_form(State(state): State<AppState>) -> Redirect {
    apply_reset(&state).await;
    Redirect::to("/")
}

/// Empty queries answer 204 so the browser stays on the widget.
pub async fn search(Query(params): Query<SearchParams>) -> Response {
    match search_url(&params.q) {
        Some(url) => Redirect::to(&url).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn apply_reset(state: &AppState) {
    let now = state.now();
    state.widget.lock().await.reset(now, &Local).await;
}
