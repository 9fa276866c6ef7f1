// src/quest/mod.rs
//
// The quest engine: question generation, scoring, the session state machine
// and daily eligibility. Everything here is either pure or parameterized on a
// `ContentRepository`; persistence and HTTP stay in `repo` and `handlers`.

pub mod eligibility;
pub mod generator;
pub mod scoring;
pub mod session;

use std::fmt;

/// Answer slots per question (one correct entry plus distractors).
pub const NUMBER_OF_CHOICES: usize = 4;

/// Question counts offered on the practice quest selection screen.
pub const QUESTION_COUNT_OPTIONS: [i32; 3] = [10, 25, 50];

pub const QUESTION_TYPE_RANDOM: i32 = 0;
pub const QUESTION_TYPE_DEFINITIONS: i32 = 1;
pub const QUESTION_TYPE_CONCEPTS: i32 = 2;
pub const QUESTION_TYPE_CALCULATIONS: i32 = 3;

/// Errors surfaced by the quest engine. No retries anywhere: an empty
/// candidate set is a hard error for the caller.
#[derive(Debug)]
pub enum QuestError {
    /// No prompt (or word) matches the requested chapter and type.
    NoPrompt {
        chapter_index: i64,
        question_type: i32,
    },
    /// A prompt exists but carries no choice flagged correct.
    NoCorrectChoice { question_index: i64 },
    /// A drawn word has no definition rows.
    NoDefinition { word_index: i64 },
    /// The chapter holds fewer distinct items than a question needs.
    InsufficientContent {
        chapter_index: i64,
        needed: usize,
        available: usize,
    },
    /// Session operation invoked while no quest is active.
    NoActiveQuest,
    /// Answer submitted after the last question was already counted.
    QuestAlreadyComplete,
    /// Daily quest start refused by the per-day cap.
    DailyLimitReached,
    /// Repository failure, propagated unchanged.
    Storage(String),
}

impl fmt::Display for QuestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestError::NoPrompt {
                chapter_index,
                question_type,
            } => write!(
                f,
                "no question content for chapter {} (type {})",
                chapter_index, question_type
            ),
            QuestError::NoCorrectChoice { question_index } => {
                write!(f, "prompt {} has no correct choice", question_index)
            }
            QuestError::NoDefinition { word_index } => {
                write!(f, "word {} has no definitions", word_index)
            }
            QuestError::InsufficientContent {
                chapter_index,
                needed,
                available,
            } => write!(
                f,
                "chapter {} has {} items where {} are needed",
                chapter_index, available, needed
            ),
            QuestError::NoActiveQuest => write!(f, "no quest is currently active"),
            QuestError::QuestAlreadyComplete => write!(f, "quest is already complete"),
            QuestError::DailyLimitReached => {
                write!(f, "daily quest limit reached for today")
            }
            QuestError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for QuestError {}

impl From<sqlx::Error> for QuestError {
    fn from(err: sqlx::Error) -> Self {
        QuestError::Storage(err.to_string())
    }
}
