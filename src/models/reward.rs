// src/models/reward.rs

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents the 'rewards' table in the database.
/// Classroom-scoped point thresholds students can spend points toward.
#[derive(Debug, Clone, FromRow)]
pub struct Reward {
    pub id: i64,
    pub class_code: String,
    pub required_points: i64,
    pub reward_name: String,
    pub reward_description: String,
}

impl Reward {
    pub fn view(&self) -> RewardView {
        RewardView {
            required_points: self.required_points,
            reward_name: self.reward_name.clone(),
            reward_description: self.reward_description.clone(),
        }
    }
}

/// Client-facing reward DTO (drops the class code and row id).
#[derive(Debug, Serialize)]
pub struct RewardView {
    pub required_points: i64,
    pub reward_name: String,
    pub reward_description: String,
}
