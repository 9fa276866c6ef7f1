// src/quest/eligibility.rs

use crate::models::classroom::Classroom;

/// Completion-time check. `dailies_completed_today` counts the user's daily
/// quest log entries for the current calendar day including the quest being
/// scored, so the Nth daily earns its bonus while N stays within the cap.
pub fn is_eligible_for_daily(classroom: &Classroom, dailies_completed_today: i64) -> bool {
    classroom.number_dailies_allowed >= dailies_completed_today
}

/// Start-time gate: a new daily may begin only while fewer than the allowed
/// count have been completed today.
pub fn can_start_daily(classroom: &Classroom, dailies_completed_today: i64) -> bool {
    dailies_completed_today < classroom.number_dailies_allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classroom_allowing(dailies: i64) -> Classroom {
        Classroom {
            class_code: "PHYS101".to_string(),
            current_chapter: 1,
            daily_exp_base: 30,
            max_multiplier: 5,
            number_dailies_allowed: dailies,
            daily_point_value: 10000,
            daily_number_of_questions: 25,
            registration_open: true,
        }
    }

    #[test]
    fn start_is_denied_at_the_cap_and_allowed_below_it() {
        let classroom = classroom_allowing(2);
        assert!(can_start_daily(&classroom, 0));
        assert!(can_start_daily(&classroom, 1));
        assert!(!can_start_daily(&classroom, 2));
        assert!(!can_start_daily(&classroom, 3));
    }

    #[test]
    fn bonus_eligibility_admits_the_quest_being_scored() {
        let classroom = classroom_allowing(2);
        // Counts include the just-completed quest.
        assert!(is_eligible_for_daily(&classroom, 1));
        assert!(is_eligible_for_daily(&classroom, 2));
        assert!(!is_eligible_for_daily(&classroom, 3));
    }
}
