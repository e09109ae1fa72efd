// src/poll.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::{Choice, Question};

/// Storage for questions and their choices.
///
/// Every read takes `now` so the publication cutoff is applied inside the
/// query rather than by filtering afterwards.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Question>, StoreError>;

    async fn published_question(
        &self,
        question_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError>;

    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError>;

    /// Adds one vote to `choice_id` if it belongs to `question_id`.
    /// Returns `false` when no such choice exists.
    async fn vote(&self, question_id: i64, choice_id: i64) -> Result<bool, StoreError>;

    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> Result<Question, StoreError>;

    async fn add_choice(&self, question_id: i64, choice_text: &str) -> Result<Choice, StoreError>;
}

pub struct PgPollStore {
    pool: PgPool,
}

impl PgPollStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgPollStore {
    async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question_text, pub_date
            FROM questions
            WHERE pub_date <= $1
            ORDER BY pub_date DESC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn published_question(
        &self,
        question_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date FROM questions WHERE id = $1 AND pub_date <= $2",
        )
        .bind(question_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError> {
        let choices = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, choice_text, votes FROM choices WHERE question_id = $1 ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn vote(&self, question_id: i64, choice_id: i64) -> Result<bool, StoreError> {
        // Increment in place so concurrent votes never overwrite each other
        let result = sqlx::query(
            r#"
            UPDATE choices
            SET votes = votes + 1
            WHERE id = $1 AND question_id = $2
            "#,
        )
        .bind(choice_id)
        .bind(question_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> Result<Question, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question_text, pub_date)
            VALUES ($1, $2)
            RETURNING id, question_text, pub_date
            "#,
        )
        .bind(question_text)
        .bind(pub_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    async fn add_choice(&self, question_id: i64, choice_text: &str) -> Result<Choice, StoreError> {
        let choice = sqlx::query_as::<_, Choice>(
            r#"
            INSERT INTO choices (question_id, choice_text, votes)
            VALUES ($1, $2, 0)
            RETURNING id, question_id, choice_text, votes
            "#,
        )
        .bind(question_id)
        .bind(choice_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::UnknownQuestion(question_id)
            }
            other => StoreError::Database(other),
        })?;

        Ok(choice)
    }
}
