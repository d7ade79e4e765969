//! Forms, questions and their options in Postgres.
//!
//! Deleting a form cascades to its questions, and deleting a question
//! cascades to its options.

use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, PgPool};

use crate::error::Result;

/// DDL for the forms domain. Safe to run on every startup.
pub const SCHEMA: &str = r#"
DO $$
BEGIN
    CREATE TYPE question_type AS ENUM ('ShortAnswer', 'MultiSelect', 'MultiChoice');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END
$$;

CREATE TABLE IF NOT EXISTS forms (
    id          SERIAL PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS questions (
    id            SERIAL PRIMARY KEY,
    form_id       INTEGER       NOT NULL REFERENCES forms (id) ON DELETE CASCADE,
    title         TEXT          NOT NULL,
    question_type question_type NOT NULL
);

CREATE TABLE IF NOT EXISTS question_options (
    id          SERIAL PRIMARY KEY,
    question_id INTEGER NOT NULL REFERENCES questions (id) ON DELETE CASCADE,
    option      TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_questions_form_id ON questions (form_id);
CREATE INDEX IF NOT EXISTS idx_question_options_question_id ON question_options (question_id);
"#;

/// One row per question of form `$1`, ordered by question id. `options` is
/// NULL when the question has none.
pub const FORM_QUESTIONS_QUERY: &str = r#"
SELECT
    q.id,
    q.form_id,
    q.title,
    q.question_type,
    ARRAY_AGG(qo.option ORDER BY qo.id) FILTER (WHERE qo.id IS NOT NULL) AS options
FROM questions q
LEFT JOIN question_options qo ON qo.question_id = q.id
WHERE q.form_id = $1
GROUP BY q.id
ORDER BY q.id
"#;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, clap::ValueEnum,
)]
#[sqlx(type_name = "question_type")]
pub enum QuestionType {
    #[value(name = "ShortAnswer")]
    ShortAnswer,
    #[value(name = "MultiSelect")]
    MultiSelect,
    #[value(name = "MultiChoice")]
    MultiChoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestionWithOptions {
    pub id: i32,
    pub form_id: i32,
    pub title: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
}

pub async fn create_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;
    // Multi-statement DDL has to go over the simple query protocol.
    (&mut *tx).execute(SCHEMA).await?;
    tx.commit().await?;

    tracing::info!("forms schema applied");
    Ok(())
}

pub async fn create_form(pool: &PgPool, title: &str, description: Option<&str>) -> Result<i32> {
    let id: i32 =
        sqlx::query_scalar("INSERT INTO forms (title, description) VALUES ($1, $2) RETURNING id")
            .bind(title)
            .bind(description)
            .fetch_one(pool)
            .await?;

    tracing::debug!(form_id = id, "form created");
    Ok(id)
}

/// Inserts a question and its options, keeping the options in the given
/// order.
pub async fn add_question(pool: &PgPool, form_id: i32, question: &NewQuestion) -> Result<i32> {
    let mut tx = pool.begin().await?;

    let id: i32 = sqlx::query_scalar(
        "INSERT INTO questions (form_id, title, question_type) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(form_id)
    .bind(&question.title)
    .bind(question.question_type)
    .fetch_one(&mut *tx)
    .await?;

    for option in &question.options {
        sqlx::query("INSERT INTO question_options (question_id, option) VALUES ($1, $2)")
            .bind(id)
            .bind(option)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        form_id,
        question_id = id,
        options = question.options.len(),
        "question added"
    );
    Ok(id)
}

pub async fn form_questions(pool: &PgPool, form_id: i32) -> Result<Vec<QuestionWithOptions>> {
    let rows = sqlx::query_as::<_, QuestionWithOptions>(FORM_QUESTIONS_QUERY)
        .bind(form_id)
        .fetch_all(pool)
        .await?;

    tracing::info!(form_id, questions = rows.len(), "fetched form questions");
    Ok(rows)
}

/// Returns whether a form with this id existed.
pub async fn delete_form(pool: &PgPool, form_id: i32) -> Result<bool> {
    let deleted = sqlx::query("DELETE FROM forms WHERE id = $1")
        .bind(form_id)
        .execute(pool)
        .await?
        .rows_affected();

    tracing::info!(form_id, deleted, "delete form");
    Ok(deleted > 0)
}
