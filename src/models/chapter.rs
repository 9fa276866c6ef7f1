// src/models/chapter.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents the 'chapters' table in the database.
/// Immutable reference data; the ordering of `chapter_index` drives
/// cumulative chapter selection.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub chapter_index: i64,
    pub chapter_name: Option<String>,
}

/// DTO describing the valid quest parameters for the quest selection screen.
#[derive(Debug, Serialize)]
pub struct QuestOptions {
    pub chapter_options: Vec<Chapter>,
    pub number_of_questions_options: Vec<i32>,
}
