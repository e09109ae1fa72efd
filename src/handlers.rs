// src/handlers.rs
use askama::Template;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;

use crate::error::AppError;
use crate::models::{Question, VoteForm};
use crate::routes::AppState;
use crate::templates::{DetailTemplate, IndexTemplate, ResultsTemplate};

/// How many questions the index page shows
pub const LATEST_QUESTIONS: i64 = 5;

pub const NO_CHOICE_MESSAGE: &str = "You did not select a choice.";

/// List the latest published questions
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let questions = state
        .store
        .published_questions(Utc::now(), LATEST_QUESTIONS)
        .await?;

    let page = IndexTemplate {
        question_list: &questions,
    }
    .render()?;
    Ok(Html(page))
}

/// Show a published question with its voting form
pub async fn detail(
    State(state): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let question = published_or_404(&state, question_id).await?;
    render_detail(&state, &question, None).await
}

/// Show the vote tally of a published question
pub async fn results(
    State(state): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let question = published_or_404(&state, question_id).await?;
    let choices = state.store.choices(question.id).await?;

    let page = ResultsTemplate {
        question: &question,
        choices: &choices,
    }
    .render()?;
    Ok(Html(page))
}

/// Record a vote and send the browser to the results page
pub async fn vote(
    State(state): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Response, AppError> {
    let question = published_or_404(&state, question_id).await?;
    let question_id = question.id;

    // An unreadable body counts as no selection
    let form = form.map(|Form(form)| form).unwrap_or_default();

    let recorded = match form.choice_id() {
        Some(choice_id) => state.store.vote(question.id, choice_id).await?,
        None => false,
    };

    if !recorded {
        tracing::debug!(question_id, choice = ?form.choice, "rejected vote");
        let page = render_detail(&state, &question, Some(NO_CHOICE_MESSAGE)).await?;
        return Ok(page.into_response());
    }

    tracing::info!(question_id, choice = ?form.choice, "vote recorded");
    Ok(Redirect::to(&format!("/polls/{}/results", question.id)).into_response())
}

/// Resolves the `{question_id}` segment to a published question. Ids that
/// do not parse are treated like ids that do not exist.
async fn published_or_404(
    state: &AppState,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Question, AppError> {
    let Ok(Path(question_id)) = question_id else {
        return Err(AppError::NotFound);
    };
    state
        .store
        .published_question(question_id, Utc::now())
        .await?
        .ok_or(AppError::NotFound)
}

async fn render_detail(
    state: &AppState,
    question: &Question,
    error_message: Option<&str>,
) -> Result<Html<String>, AppError> {
    let choices = state.store.choices(question.id).await?;
    let page = DetailTemplate {
        question,
        choices: &choices,
        error_message,
    }
    .render()?;
    Ok(Html(page))
}
