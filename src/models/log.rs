// src/models/log.rs

use chrono::{DateTime, Utc};

/// Insert payload for the 'activity_log' table, one per submitted answer.
///
/// Built by the quest engine and persisted best-effort by the handler; the
/// device and network columns are placeholders kept for schema compatibility
/// (user-agent parsing and geolocation are not wired up).
#[derive(Debug, Clone)]
pub struct ActivityLogDraft {
    pub user_id: String,
    pub correct: bool,
    pub question_index: i64,
    pub answer_index: i64,
    pub datetime: DateTime<Utc>,
    pub datetime_quest_started: DateTime<Utc>,
    pub datetime_question_started: Option<DateTime<Utc>>,
    pub is_daily: bool,
    pub is_timed: Option<bool>,
    pub number_of_questions: i32,
    pub device_family: Option<String>,
    pub device_model: Option<String>,
    pub device_type: Option<i32>,
    pub ip_address: Option<String>,
}

/// Insert payload for the 'quest_log' table, one per completed quest.
/// This is the historical record the daily eligibility count is computed from.
#[derive(Debug, Clone)]
pub struct QuestLogDraft {
    pub user_id: String,
    pub chapter_index: Option<i64>,
    pub cumulative: bool,
    pub datetime_quest_started: DateTime<Utc>,
    pub datetime_quest_completed: DateTime<Utc>,
    pub is_daily: bool,
    pub is_timed: Option<bool>,
    pub number_correct: i32,
    pub number_of_questions: i32,
    pub device_family: Option<String>,
    pub device_model: Option<String>,
    pub device_type: Option<i32>,
    pub ip_address: Option<String>,
}
