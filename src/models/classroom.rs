// src/models/classroom.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'classrooms' table in the database.
///
/// Read by the quest engine and the eligibility check; mutated only by
/// instructor routes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Classroom {
    pub class_code: String,

    /// The chapter daily quests currently draw from.
    pub current_chapter: i64,

    /// Base of the daily completion bonus exponential.
    pub daily_exp_base: i32,

    /// Streak multiplier cap for this classroom.
    pub max_multiplier: i32,

    /// Daily quests a student may complete per calendar day.
    pub number_dailies_allowed: i64,

    /// Completion points a daily quest starts with, before accuracy scaling.
    pub daily_point_value: i64,

    pub daily_number_of_questions: i32,

    pub registration_open: bool,
}

/// DTO summarizing a user's daily quest standing.
#[derive(Debug, Serialize)]
pub struct DailyStatus {
    pub dailies_complete: i64,
    pub dailies_allowed: i64,
    pub daily_chapter: i64,
}

/// DTO for the instructor route moving the classroom's chapter pointer.
#[derive(Debug, Deserialize, Validate)]
pub struct SetChapterRequest {
    #[validate(range(min = 1))]
    pub chapter_index: i64,
}
