// src/quest/scoring.rs
//
// Pure point math over the session state. No I/O here.

use serde::Serialize;

use crate::models::classroom::Classroom;
use crate::models::user::User;

use super::QUESTION_TYPE_CALCULATIONS;

pub const DAILY_POINTS_PER_QUESTION: i64 = 20;
pub const PRACTICE_BASE_POINTS: i64 = 10;
pub const TIMED_POINT_BONUS: i64 = 3;
pub const CUMULATIVE_POINT_BONUS: i64 = 3;
pub const CALCULATION_POINT_BONUS: i64 = 3;

/// End-of-quest breakdown for client display.
#[derive(Debug, Serialize)]
pub struct PerformanceSummary {
    pub number_correct: i32,
    pub number_total: i32,
    pub points_per_question: i64,
    /// Points earned beyond the flat per-question value, i.e. what the
    /// streak multiplier contributed.
    pub multiplier_points: i64,
    pub score_bonus: i64,
}

/// Per-question point value, fixed at quest start. Daily quests pay a flat
/// rate; practice quests pay a base plus a bonus per difficulty flag.
pub fn points_per_question(
    is_daily: bool,
    is_timed: bool,
    cumulative: bool,
    question_type: i32,
) -> i64 {
    if is_daily {
        return DAILY_POINTS_PER_QUESTION;
    }

    let mut points = PRACTICE_BASE_POINTS;
    if is_timed {
        points += TIMED_POINT_BONUS;
    }
    if cumulative {
        points += CUMULATIVE_POINT_BONUS;
    }
    if question_type == QUESTION_TYPE_CALCULATIONS {
        points += CALCULATION_POINT_BONUS;
    }
    points
}

/// Awards `points_per_question x multiplier`, then advances the multiplier
/// up to the classroom cap.
pub fn award_correct_answer(user: &mut User, classroom: &Classroom) {
    let points = user.points_per_question.unwrap_or(0) * i64::from(user.multiplier);
    user.points_earned_current_quest += points;
    user.total_points += points;
    user.number_correct += 1;
    if user.multiplier < classroom.max_multiplier {
        user.multiplier += 1;
    }
}

/// An incorrect (or absent) answer breaks the streak. No points move.
pub fn apply_incorrect_answer(user: &mut User) {
    user.multiplier = 1;
}

/// Accuracy-scaled completion bonus for daily quests:
/// `round(base^pct / base * completion_points)` with `pct` the fraction of
/// questions answered correctly. A zero-question quest yields a zero bonus
/// rather than dividing by zero.
pub fn award_daily_completion_bonus(user: &mut User, classroom: &Classroom) {
    let number_of_questions = user.number_of_questions.unwrap_or(0);
    let bonus = if number_of_questions == 0 {
        0
    } else {
        let base = f64::from(classroom.daily_exp_base);
        let pct = f64::from(user.number_correct) / f64::from(number_of_questions);
        let completion_points = user.completion_points.unwrap_or(0) as f64;
        (base.powf(pct) / base * completion_points).round() as i64
    };
    user.completion_points = Some(bonus);
    user.total_points += bonus;
}

pub fn performance_summary(user: &User) -> PerformanceSummary {
    let points_per_question = user.points_per_question.unwrap_or(0);
    PerformanceSummary {
        number_correct: user.number_correct,
        number_total: user.number_of_questions.unwrap_or(0),
        points_per_question,
        multiplier_points: user.points_earned_current_quest
            - points_per_question * i64::from(user.number_correct),
        score_bonus: user.completion_points.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_classroom() -> Classroom {
        Classroom {
            class_code: "PHYS101".to_string(),
            current_chapter: 3,
            daily_exp_base: 30,
            max_multiplier: 5,
            number_dailies_allowed: 2,
            daily_point_value: 10000,
            daily_number_of_questions: 25,
            registration_open: true,
        }
    }

    fn quest_user(points_per_question: i64, number_of_questions: i32) -> User {
        User {
            user_id: "u1".to_string(),
            first_name: None,
            last_name: None,
            e_mail: "u1@example.edu".to_string(),
            class_code: Some("PHYS101".to_string()),
            user_role: 0,
            research_agreement_status: 0,
            reward_level: 0,
            total_points: 0,
            multiplier: 1,
            chapter_index: Some(1),
            completion_points: Some(0),
            cumulative: Some(false),
            current_progress: 0,
            number_correct: 0,
            current_answer_index: None,
            current_question_index: None,
            datetime_quest_started: None,
            datetime_question_started: None,
            is_on_daily: Some(false),
            is_timed: Some(false),
            number_of_questions: Some(number_of_questions),
            points_earned_current_quest: 0,
            points_per_question: Some(points_per_question),
            question_type: Some(2),
        }
    }

    #[test]
    fn practice_points_stack_per_flag() {
        assert_eq!(points_per_question(false, false, false, 2), 10);
        assert_eq!(points_per_question(false, true, false, 2), 13);
        assert_eq!(points_per_question(false, true, true, 2), 16);
        assert_eq!(points_per_question(false, true, true, 3), 19);
    }

    #[test]
    fn daily_points_ignore_flags() {
        assert_eq!(points_per_question(true, false, false, 1), 20);
        assert_eq!(points_per_question(true, true, true, 3), 20);
    }

    #[test]
    fn streak_of_seven_with_cap_five_pays_250() {
        let classroom = test_classroom();
        let mut user = quest_user(10, 7);

        for _ in 0..7 {
            award_correct_answer(&mut user, &classroom);
        }

        // Multiplier sequence 1,2,3,4,5,5,5 at 10 points each.
        assert_eq!(user.points_earned_current_quest, 250);
        assert_eq!(user.total_points, 250);
        assert_eq!(user.multiplier, 5);
        assert_eq!(user.number_correct, 7);
    }

    #[test]
    fn incorrect_answer_resets_multiplier_to_one() {
        let classroom = test_classroom();
        let mut user = quest_user(10, 5);

        award_correct_answer(&mut user, &classroom);
        award_correct_answer(&mut user, &classroom);
        assert_eq!(user.multiplier, 3);

        apply_incorrect_answer(&mut user);
        assert_eq!(user.multiplier, 1);
        assert_eq!(user.points_earned_current_quest, 30);
    }

    #[test]
    fn daily_bonus_scales_with_accuracy() {
        let classroom = test_classroom();
        let mut user = quest_user(20, 25);
        user.number_correct = 20;
        user.completion_points = Some(10000);

        award_daily_completion_bonus(&mut user, &classroom);

        // pct = 0.8, bonus = round(30^0.8 / 30 * 10000)
        let expected = (30f64.powf(0.8) / 30.0 * 10000.0).round() as i64;
        assert_eq!(expected, 5065);
        assert_eq!(user.completion_points, Some(expected));
        assert_eq!(user.total_points, expected);
    }

    #[test]
    fn zero_question_quest_yields_zero_bonus() {
        let classroom = test_classroom();
        let mut user = quest_user(20, 0);
        user.completion_points = Some(10000);
        user.total_points = 500;

        award_daily_completion_bonus(&mut user, &classroom);

        assert_eq!(user.completion_points, Some(0));
        assert_eq!(user.total_points, 500);
    }

    #[test]
    fn performance_summary_isolates_multiplier_contribution() {
        let classroom = test_classroom();
        let mut user = quest_user(10, 3);

        award_correct_answer(&mut user, &classroom); // 10
        award_correct_answer(&mut user, &classroom); // 20
        award_correct_answer(&mut user, &classroom); // 30

        let summary = performance_summary(&user);
        assert_eq!(summary.number_correct, 3);
        assert_eq!(summary.number_total, 3);
        assert_eq!(summary.points_per_question, 10);
        assert_eq!(summary.multiplier_points, 60 - 30);
        assert_eq!(summary.score_bonus, 0);
    }
}
