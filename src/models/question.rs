// src/models/question.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents the 'mc_prompts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct McPrompt {
    pub index: i64,

    pub chapter_index: i64,

    /// Prompt category (2 = concepts, 3 = calculations).
    /// Mapped from the database column 'type' since `type` is a reserved keyword in Rust.
    #[sqlx(rename = "type")]
    pub question_type: i32,

    /// The text content of the prompt.
    pub text: String,

    pub img_path: Option<String>,
}

/// Represents the 'mc_choices' table in the database.
/// Exactly one choice per prompt carries `correct = true` in current data,
/// though the schema permits more.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct McChoice {
    pub index: i64,

    /// Owning prompt.
    pub question_index: i64,

    pub text: String,

    pub correct: bool,

    /// Running count of submissions that picked this choice.
    pub times_chosen: i64,
}
