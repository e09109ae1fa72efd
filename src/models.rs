// src/models.rs
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True when the question went live within the day leading up to `now`.
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) < self.pub_date && self.pub_date <= now
    }

    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    /// Listing, detail, results and voting only see questions whose publication time has passed.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i32,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// Body of the vote form. `choice` stays a raw string so a missing or garbled
/// selection re-renders the form instead of failing extraction. A repeated
/// `choice` field keeps its last value.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl From<Vec<(String, String)>> for VoteForm {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let choice = pairs
            .into_iter()
            .filter(|(key, _)| key == "choice")
            .map(|(_, value)| value)
            .last();
        Self { choice }
    }
}

impl VoteForm {
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_at(pub_date: DateTime<Utc>) -> Question {
        Question {
            id: 1,
            question_text: "What's new?".to_string(),
            pub_date,
        }
    }

    #[test]
    fn was_published_recently_with_future_question() {
        let now = Utc::now();
        let question = question_at(now + Duration::seconds(1));
        assert!(!question.was_published_recently_at(now));
    }

    #[test]
    fn was_published_recently_with_old_question() {
        let now = Utc::now();
        let question = question_at(now - Duration::days(1) - Duration::seconds(1));
        assert!(!question.was_published_recently_at(now));
    }

    #[test]
    fn was_published_recently_with_recent_question() {
        let now = Utc::now();
        let question = question_at(now - Duration::hours(23) - Duration::minutes(59));
        assert!(question.was_published_recently_at(now));
    }

    #[test]
    fn was_published_recently_against_the_clock() {
        let recent = question_at(Utc::now() - Duration::hours(23));
        assert!(recent.was_published_recently());
        let future = question_at(Utc::now() + Duration::hours(1));
        assert!(!future.was_published_recently());
    }

    #[test]
    fn was_published_recently_boundaries() {
        let now = Utc::now();
        assert!(question_at(now).was_published_recently_at(now));
        assert!(!question_at(now - Duration::days(1)).was_published_recently_at(now));
    }

    #[test]
    fn future_question_is_not_published() {
        let now = Utc::now();
        assert!(!question_at(now + Duration::days(30)).is_published_at(now));
        assert!(question_at(now).is_published_at(now));
    }

    #[test]
    fn display_uses_text() {
        let question = question_at(Utc::now());
        assert_eq!(question.to_string(), "What's new?");
        let choice = Choice {
            id: 3,
            question_id: 1,
            choice_text: "Not much".to_string(),
            votes: 0,
        };
        assert_eq!(choice.to_string(), "Not much");
    }

    #[test]
    fn vote_form_parses_choice_id() {
        let form = VoteForm {
            choice: Some(" 42 ".to_string()),
        };
        assert_eq!(form.choice_id(), Some(42));
        assert_eq!(VoteForm::default().choice_id(), None);
        let garbled = VoteForm {
            choice: Some("abc".to_string()),
        };
        assert_eq!(garbled.choice_id(), None);
    }

    #[test]
    fn vote_form_keeps_last_repeated_choice() {
        let form = VoteForm::from(vec![
            ("choice".to_string(), "1".to_string()),
            ("csrf".to_string(), "x".to_string()),
            ("choice".to_string(), "2".to_string()),
        ]);
        assert_eq!(form.choice_id(), Some(2));
        assert_eq!(VoteForm::from(Vec::new()).choice, None);
    }
}
