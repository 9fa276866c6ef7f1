// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// The quest-scoped columns (everything from `chapter_index` down) form the
/// quest session state: they are `Some`/non-zero only while a quest is active
/// and are cleared as a unit when the quest is dropped or completed. All
/// transitions go through `quest::session`; this struct is a plain record.
///
/// Deliberately not `Serialize`: responses go through [`UserSummary`] so the
/// pending correct-answer index and other sensitive columns can never leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub e_mail: String,
    pub class_code: Option<String>,
    pub user_role: i32,
    pub research_agreement_status: i32,
    pub reward_level: i32,
    pub total_points: i64,

    /// Streak multiplier. Retained across quests; reset to 1 on quest drop.
    pub multiplier: i32,

    // Quest session state
    pub chapter_index: Option<i64>,
    pub completion_points: Option<i64>,
    pub cumulative: Option<bool>,
    pub current_progress: i32,
    pub number_correct: i32,
    pub current_answer_index: Option<i64>,
    pub current_question_index: Option<i64>,
    pub datetime_quest_started: Option<DateTime<Utc>>,
    pub datetime_question_started: Option<DateTime<Utc>>,
    pub is_on_daily: Option<bool>,
    pub is_timed: Option<bool>,
    pub number_of_questions: Option<i32>,
    pub points_earned_current_quest: i64,
    pub points_per_question: Option<i64>,
    pub question_type: Option<i32>,
}

impl User {
    /// An active session always has its question count populated.
    pub fn on_quest(&self) -> bool {
        self.number_of_questions.is_some()
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_id: self.user_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            research_agreement_status: self.research_agreement_status,
            reward_level: self.reward_level,
            total_points: self.total_points,
            multiplier: self.multiplier,
            chapter_index: self.chapter_index,
            completion_points: self.completion_points,
            cumulative: self.cumulative,
            current_progress: self.current_progress,
            number_correct: self.number_correct,
            current_question_index: self.current_question_index,
            is_on_daily: self.is_on_daily,
            is_timed: self.is_timed,
            number_of_questions: self.number_of_questions,
            points_earned_current_quest: self.points_earned_current_quest,
            points_per_question: self.points_per_question,
            question_type: self.question_type,
        }
    }
}

/// Client-facing user DTO. Enumerates exactly the fields the clients see;
/// excludes the email address, class code, role, pending answer index and
/// raw timestamps.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub research_agreement_status: i32,
    pub reward_level: i32,
    pub total_points: i64,
    pub multiplier: i32,
    pub chapter_index: Option<i64>,
    pub completion_points: Option<i64>,
    pub cumulative: Option<bool>,
    pub current_progress: i32,
    pub number_correct: i32,
    pub current_question_index: Option<i64>,
    pub is_on_daily: Option<bool>,
    pub is_timed: Option<bool>,
    pub number_of_questions: Option<i32>,
    pub points_earned_current_quest: i64,
    pub points_per_question: Option<i64>,
    pub question_type: Option<i32>,
}

/// One row of the class leaderboard.
#[derive(Debug, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub first_name: Option<String>,
    pub total_points: i64,
}

/// DTO for creating the user record behind an authenticated identity.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 20))]
    pub class_code: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub e_mail: String,
}

/// DTO for recording the research agreement choice.
#[derive(Debug, Deserialize, Validate)]
pub struct SignAgreementRequest {
    #[validate(range(min = 0, max = 2))]
    pub agreement_choice: i32,
}
