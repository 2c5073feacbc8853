use crate::errors::AppError;
use crate::feed::into_dashboard;
use crate::models::{BodyCompositionPayload, RecordForm, RecordRequest, RecordResponse, ViewQuery};
use crate::state::AppState;
use crate::storage::{form_defaults, persist_data, upsert};
use crate::ui::render_index;
use crate::view::{DashboardLoad, ViewState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    let view_state = ViewState::from_controls(
        query.granularity.as_deref(),
        query.duration.as_deref(),
        query.changed.as_deref(),
    )
    .unwrap_or_else(|err| {
        warn!("resetting dashboard controls: {err}");
        ViewState::initial()
    });

    let today = today();
    let load = into_dashboard(state.source.fetch(&state.data).await);
    let defaults = {
        let data = state.data.lock().await;
        form_defaults(&data, today)
    };

    Html(render_index(view_state, &load, today, defaults))
}

pub async fn get_payload(State(state): State<AppState>) -> Result<Json<BodyCompositionPayload>, AppError> {
    let payload = state.source.fetch(&state.data).await?;
    Ok(Json(payload))
}

pub async fn get_view(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Result<Response, AppError> {
    let view_state = ViewState::from_controls(
        query.granularity.as_deref(),
        query.duration.as_deref(),
        query.changed.as_deref(),
    )?;

    match into_dashboard(state.source.fetch(&state.data).await) {
        DashboardLoad::Ready(dashboard) => Ok(Json(dashboard.render(view_state, today())).into_response()),
        DashboardLoad::Unavailable(message) => Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unavailable", "message": message })),
        )
            .into_response()),
    }
}

pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let response = apply_record(&state, &payload).await?;
    Ok(Json(response))
}

pub async fn record_form(State(state): State<AppState>, Form(form): Form<RecordForm>) -> Result<Redirect, AppError> {
    let request = form.into_request().map_err(AppError::bad_request)?;
    apply_record(&state, &request).await?;
    Ok(Redirect::to("/"))
}

async fn apply_record(state: &AppState, request: &RecordRequest) -> Result<RecordResponse, AppError> {
    let mut data = state.data.lock().await;
    let (date, measurement, changed) = upsert(&mut data, request, today())?;

    if changed {
        persist_data(&state.data_path, &data).await?;
        info!("recorded {date}: weight={} body_fat={:?}", measurement.weight, measurement.body_fat);
    }

    Ok(RecordResponse {
        date: date.to_string(),
        weight: measurement.weight,
        body_fat: measurement.body_fat,
        changed,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
