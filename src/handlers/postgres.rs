use std::io::Write;

use anyhow::Context;
use serde_json::json;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::write_json;
use crate::{
    config::{AddQuestionArgs, CreateFormArgs, DatabaseConfig, QuestionsArgs},
    services::forms::{self, NewQuestion},
};

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    // setup connection pool
    let pool: PgPool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect(&config.database_url)
        .await
        .context("failed to connect to postgres")?;

    tracing::debug!(max_connections = config.max_connections, "postgres pool ready");
    Ok(pool)
}

pub async fn schema_command(pool: &PgPool) -> anyhow::Result<()> {
    forms::create_schema(pool)
        .await
        .context("failed to apply forms schema")?;
    Ok(())
}

/// Prints `{"form_id": <id>}`.
pub async fn create_form_command<W: Write>(
    pool: &PgPool,
    args: &CreateFormArgs,
    writer: W,
) -> anyhow::Result<i32> {
    let form_id = forms::create_form(pool, &args.title, args.description.as_deref())
        .await
        .context("failed to create form")?;

    write_json(writer, &json!({ "form_id": form_id }), false)?;
    Ok(form_id)
}

/// Prints `{"question_id": <id>}`.
pub async fn add_question_command<W: Write>(
    pool: &PgPool,
    args: &AddQuestionArgs,
    writer: W,
) -> anyhow::Result<i32> {
    let question = NewQuestion {
        title: args.title.clone(),
        question_type: args.question_type,
        options: args.options.clone(),
    };
    let question_id = forms::add_question(pool, args.form_id, &question)
        .await
        .with_context(|| format!("failed to add question to form {}", args.form_id))?;

    write_json(writer, &json!({ "question_id": question_id }), false)?;
    Ok(question_id)
}

pub async fn questions_command<W: Write>(
    pool: &PgPool,
    args: &QuestionsArgs,
    writer: W,
) -> anyhow::Result<()> {
    let rows = forms::form_questions(pool, args.form_id)
        .await
        .with_context(|| format!("failed to fetch questions of form {}", args.form_id))?;

    write_json(writer, &rows, args.pretty)
}

/// Prints `{"form_id": <id>, "deleted": <bool>}`.
pub async fn delete_form_command<W: Write>(
    pool: &PgPool,
    form_id: i32,
    writer: W,
) -> anyhow::Result<bool> {
    let deleted = forms::delete_form(pool, form_id)
        .await
        .with_context(|| format!("failed to delete form {form_id}"))?;

    if !deleted {
        tracing::warn!(form_id, "no form with this id");
    }
    write_json(writer, &json!({ "form_id": form_id, "deleted": deleted }), false)?;
    Ok(deleted)
}
