use crate::errors::AppError;
use crate::models::{AppData, CountForm, CountRequest, DeleteForm, DeleteRequest, SummaryResponse};
use crate::state::AppState;
use crate::storage::{clear_data, persist_data};
use crate::summary::build_summary;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let summary = build_summary(&data);
    Html(render_index(&today_display(), &summary))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(build_summary(&data))
}

pub async fn set_count(
    State(state): State<AppState>,
    Json(payload): Json<CountRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = apply_count(&state, &payload.label, &payload.quantity).await?;
    Ok(Json(summary))
}

pub async fn delete_count(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = apply_delete(&state, &payload.label).await?;
    Ok(Json(summary))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let summary = apply_reset(&state).await?;
    Ok(Json(summary))
}

pub async fn count_form(
    State(state): State<AppState>,
    Form(form): Form<CountForm>,
) -> Result<Redirect, AppError> {
    apply_count(&state, &form.label, &form.quantity).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, &form.label).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_reset(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_count(
    state: &AppState,
    label: &str,
    quantity: &str,
) -> Result<SummaryResponse, AppError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::validation("Turma inválida."));
    }
    let students = parse_quantity(quantity)?;

    let mut data = state.data.lock().await;
    data.counts.insert(label.to_string(), students);
    persist_data(&state.data_path, &data).await?;

    Ok(build_summary(&data))
}

async fn apply_delete(state: &AppState, label: &str) -> Result<SummaryResponse, AppError> {
    let mut data = state.data.lock().await;
    // Absent label: store untouched, nothing rewritten.
    if data.counts.remove(label).is_some() {
        persist_data(&state.data_path, &data).await?;
    }

    Ok(build_summary(&data))
}

async fn apply_reset(state: &AppState) -> Result<SummaryResponse, AppError> {
    let mut data = state.data.lock().await;
    *data = AppData::default();
    clear_data(&state.data_path).await?;

    Ok(build_summary(&data))
}

/// Entry validation: raw input text must parse as an integer >= 1. The
/// message is user-facing, shown inside the entry dialog.
fn parse_quantity(raw: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(AppError::validation(
            "Por favor, insira uma quantidade válida.",
        )),
    }
}

fn today_display() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}
