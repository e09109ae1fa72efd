// src/templates.rs
use askama::Template;

use crate::models::{Choice, Question};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub question_list: &'a [Question],
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
    /// Shown above the form when a vote was rejected
    pub error_message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
}
