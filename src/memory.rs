// src/memory.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::{Choice, Question};
use crate::poll::PollStore;

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    next_question_id: i64,
    next_choice_id: i64,
}

/// In-process store for tests and local runs without PostgreSQL.
#[derive(Default)]
pub struct MemoryPollStore {
    tables: Mutex<Tables>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choice lookup that ignores publication state.
    pub async fn choice(&self, choice_id: i64) -> Option<Choice> {
        let tables = self.tables.lock().await;
        tables.choices.iter().find(|c| c.id == choice_id).cloned()
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.lock().await;
        let mut questions: Vec<Question> = tables
            .questions
            .iter()
            .filter(|q| q.is_published_at(now))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        questions.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(questions)
    }

    async fn published_question(
        &self,
        question_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .questions
            .iter()
            .find(|q| q.id == question_id && q.is_published_at(now))
            .cloned())
    }

    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn vote(&self, question_id: i64, choice_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        match tables
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id && c.question_id == question_id)
        {
            Some(choice) => {
                choice.votes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> Result<Question, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.next_question_id += 1;
        let question = Question {
            id: tables.next_question_id,
            question_text: question_text.to_string(),
            pub_date,
        };
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn add_choice(&self, question_id: i64, choice_text: &str) -> Result<Choice, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(StoreError::UnknownQuestion(question_id));
        }
        tables.next_choice_id += 1;
        let choice = Choice {
            id: tables.next_choice_id,
            question_id,
            choice_text: choice_text.to_string(),
            votes: 0,
        };
        tables.choices.push(choice.clone());
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn listing_skips_future_and_orders_newest_first() {
        let store = MemoryPollStore::new();
        let now = Utc::now();
        store.create_question("old", now - Duration::days(30)).await.unwrap();
        store.create_question("new", now - Duration::days(5)).await.unwrap();
        store.create_question("future", now + Duration::days(30)).await.unwrap();

        let listed = store.published_questions(now, 5).await.unwrap();
        let texts: Vec<_> = listed.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, ["new", "old"]);
    }

    #[tokio::test]
    async fn listing_respects_limit() {
        let store = MemoryPollStore::new();
        let now = Utc::now();
        for day in 1..=7 {
            store
                .create_question(&format!("q{day}"), now - Duration::days(day))
                .await
                .unwrap();
        }
        assert_eq!(store.published_questions(now, 5).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn vote_only_touches_choices_of_the_question() {
        let store = MemoryPollStore::new();
        let now = Utc::now();
        let first = store.create_question("first", now).await.unwrap();
        let second = store.create_question("second", now).await.unwrap();
        let a = store.add_choice(first.id, "a").await.unwrap();
        let b = store.add_choice(second.id, "b").await.unwrap();

        assert!(store.vote(first.id, a.id).await.unwrap());
        assert!(!store.vote(first.id, b.id).await.unwrap());
        assert!(!store.vote(first.id, 999).await.unwrap());

        assert_eq!(store.choice(a.id).await.unwrap().votes, 1);
        assert_eq!(store.choice(b.id).await.unwrap().votes, 0);
    }

    #[tokio::test]
    async fn add_choice_requires_question() {
        let store = MemoryPollStore::new();
        let err = store.add_choice(7, "orphan").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownQuestion(7)));
    }

    #[tokio::test]
    async fn concurrent_votes_are_not_lost() {
        let store = Arc::new(MemoryPollStore::new());
        let question = store.create_question("busy", Utc::now()).await.unwrap();
        let choice = store.add_choice(question.id, "popular").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.vote(question.id, choice.id).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(store.choice(choice.id).await.unwrap().votes, 50);
    }
}
