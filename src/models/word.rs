// src/models/word.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents the 'words' table in the database.
/// Source material for definition-style questions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Word {
    pub word_index: i64,
    pub chapter_index: i64,
    pub word: String,
}

/// Represents the 'definitions' table in the database.
/// A word may carry several phrasings of its definition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Definition {
    pub word_index: i64,
    pub chapter_index: i64,
    pub definition: String,
}
