// src/quest/session.rs
//
// The quest session state machine. Sessions live flat on the user record;
// this module owns every transition between Idle and Active.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::classroom::Classroom;
use crate::models::log::{ActivityLogDraft, QuestLogDraft};
use crate::models::user::User;
use crate::repo::ContentRepository;

use super::generator::{GeneratedQuestion, QuestionGenerator};
use super::{
    QUESTION_TYPE_CALCULATIONS, QuestError, eligibility, scoring,
};

/// Raw quest start request from the client.
#[derive(Debug, Deserialize, Validate)]
pub struct StartQuestRequest {
    pub is_daily: bool,
    #[validate(range(min = 1))]
    pub chapter_index: Option<i64>,
    #[validate(range(min = 1))]
    pub number_of_questions: Option<i32>,
    pub is_timed: Option<bool>,
    pub cumulative: Option<bool>,
    #[validate(range(min = 0, max = 3))]
    pub question_type: Option<i32>,
}

/// Resolved quest mode. Daily parameters come from the classroom; practice
/// parameters from the caller.
#[derive(Debug, Clone)]
pub enum QuestMode {
    Daily,
    Practice(PracticeParams),
}

#[derive(Debug, Clone)]
pub struct PracticeParams {
    pub chapter_index: i64,
    pub number_of_questions: i32,
    pub is_timed: bool,
    pub cumulative: bool,
    pub question_type: i32,
}

/// Verdict on one submitted answer, echoed back to the client.
#[derive(Debug, Serialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_answer: i64,
    pub user_answer: Option<i64>,
}

/// Everything one answer submission produces: the verdict, the follow-up
/// question or completion summary, and the log drafts for the handler to
/// persist.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub feedback: AnswerFeedback,
    pub quest_complete: bool,
    pub next_question: Option<GeneratedQuestion>,
    pub performance: Option<scoring::PerformanceSummary>,
    pub activity: ActivityLogDraft,
    pub quest_log: Option<QuestLogDraft>,
}

/// Orchestrates the session lifecycle against injected content storage.
pub struct QuestEngine<'a, R: ContentRepository> {
    repo: &'a R,
}

impl<'a, R: ContentRepository> QuestEngine<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Idle -> Active. Daily quests take every parameter from the classroom
    /// and are gated by the per-day cap; practice quests take the caller's
    /// choices and earn no completion bonus. The streak multiplier is
    /// deliberately left untouched.
    pub fn start_quest(
        &self,
        user: &mut User,
        classroom: &Classroom,
        mode: &QuestMode,
        dailies_completed_today: i64,
        now: DateTime<Utc>,
    ) -> Result<(), QuestError> {
        match mode {
            QuestMode::Daily => {
                if !eligibility::can_start_daily(classroom, dailies_completed_today) {
                    return Err(QuestError::DailyLimitReached);
                }
                user.datetime_quest_started = Some(now);
                user.chapter_index = Some(classroom.current_chapter);
                user.current_progress = 0;
                user.number_correct = 0;
                user.completion_points = Some(classroom.daily_point_value);
                user.is_timed = Some(true);
                user.points_per_question =
                    Some(scoring::points_per_question(true, true, true, QUESTION_TYPE_CALCULATIONS));
                user.number_of_questions = Some(classroom.daily_number_of_questions);
                user.cumulative = Some(true);
                user.question_type = Some(QUESTION_TYPE_CALCULATIONS);
                user.is_on_daily = Some(true);
                user.points_earned_current_quest = 0;
            }
            QuestMode::Practice(params) => {
                user.datetime_quest_started = Some(now);
                user.chapter_index = Some(params.chapter_index);
                user.current_progress = 0;
                user.number_correct = 0;
                user.completion_points = Some(0);
                user.is_timed = Some(params.is_timed);
                user.points_per_question = Some(scoring::points_per_question(
                    false,
                    params.is_timed,
                    params.cumulative,
                    params.question_type,
                ));
                user.number_of_questions = Some(params.number_of_questions);
                user.cumulative = Some(params.cumulative);
                user.question_type = Some(params.question_type);
                user.is_on_daily = Some(false);
                user.points_earned_current_quest = 0;
            }
        }
        Ok(())
    }

    /// Generates and records a new outstanding question for the active
    /// session. Progress is untouched, so this doubles as the resume path
    /// when client-side state was lost.
    pub async fn next_question(
        &self,
        user: &mut User,
        rng: &mut (impl Rng + Send),
        now: DateTime<Utc>,
    ) -> Result<GeneratedQuestion, QuestError> {
        let chapter_index = user.chapter_index.ok_or(QuestError::NoActiveQuest)?;
        if !user.on_quest() {
            return Err(QuestError::NoActiveQuest);
        }

        let generator = QuestionGenerator::new(self.repo);
        let question = generator
            .generate(
                chapter_index,
                user.question_type.unwrap_or(super::QUESTION_TYPE_RANDOM),
                user.cumulative.unwrap_or(false),
                rng,
            )
            .await?;

        user.current_answer_index = Some(question.correct_answer_index);
        user.current_question_index = Some(question.question_index);
        user.datetime_question_started = Some(now);

        Ok(question)
    }

    /// Scores one answer against the outstanding question and advances
    /// progress by exactly one. On the terminal answer the session is
    /// discharged to Idle, the daily bonus applied when the eligibility count
    /// (including this quest) allows, and a quest log draft emitted;
    /// otherwise a fresh question comes back.
    ///
    /// `dailies_completed_before` is today's completed-daily count *prior* to
    /// this quest.
    pub async fn submit_answer(
        &self,
        user: &mut User,
        classroom: &Classroom,
        user_answer: Option<i64>,
        dailies_completed_before: i64,
        rng: &mut (impl Rng + Send),
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, QuestError> {
        let total = user.number_of_questions.ok_or(QuestError::NoActiveQuest)?;
        if user.current_progress >= total {
            return Err(QuestError::QuestAlreadyComplete);
        }
        let correct_answer = user.current_answer_index.ok_or(QuestError::NoActiveQuest)?;
        let question_index = user
            .current_question_index
            .ok_or(QuestError::NoActiveQuest)?;

        // An absent answer is always incorrect.
        let is_correct = user_answer == Some(correct_answer);

        if let Some(answer) = user_answer {
            self.repo.record_choice_selected(answer).await?;
        }

        let activity = ActivityLogDraft {
            user_id: user.user_id.clone(),
            correct: is_correct,
            question_index,
            answer_index: correct_answer,
            datetime: now,
            datetime_quest_started: user.datetime_quest_started.unwrap_or(now),
            datetime_question_started: user.datetime_question_started,
            is_daily: user.is_on_daily.unwrap_or(false),
            is_timed: user.is_timed,
            number_of_questions: total,
            device_family: None,
            device_model: None,
            device_type: None,
            ip_address: None,
        };

        if is_correct {
            scoring::award_correct_answer(user, classroom);
        } else {
            scoring::apply_incorrect_answer(user);
        }
        user.current_progress += 1;

        let feedback = AnswerFeedback {
            is_correct,
            correct_answer,
            user_answer,
        };

        if user.current_progress >= total {
            let quest_log = QuestLogDraft {
                user_id: user.user_id.clone(),
                chapter_index: user.chapter_index,
                cumulative: user.cumulative.unwrap_or(false),
                datetime_quest_started: user.datetime_quest_started.unwrap_or(now),
                datetime_quest_completed: now,
                is_daily: user.is_on_daily.unwrap_or(false),
                is_timed: user.is_timed,
                number_correct: user.number_correct,
                number_of_questions: total,
                device_family: None,
                device_model: None,
                device_type: None,
                ip_address: None,
            };

            if user.is_on_daily.unwrap_or(false)
                && eligibility::is_eligible_for_daily(classroom, dailies_completed_before + 1)
            {
                scoring::award_daily_completion_bonus(user, classroom);
            }

            let performance = scoring::performance_summary(user);
            drop_quest(user);

            Ok(SubmitOutcome {
                feedback,
                quest_complete: true,
                next_question: None,
                performance: Some(performance),
                activity,
                quest_log: Some(quest_log),
            })
        } else {
            let next = self.next_question(user, rng, now).await?;

            Ok(SubmitOutcome {
                feedback,
                quest_complete: false,
                next_question: Some(next),
                performance: None,
                activity,
                quest_log: None,
            })
        }
    }
}

/// Active -> Idle. Clears every quest-scoped field, resets the multiplier
/// and keeps the lifetime point total. A no-op on an idle session.
pub fn drop_quest(user: &mut User) {
    if !user.on_quest() {
        return;
    }
    user.chapter_index = None;
    user.completion_points = None;
    user.cumulative = None;
    user.current_progress = 0;
    user.current_answer_index = None;
    user.current_question_index = None;
    user.datetime_question_started = None;
    user.datetime_quest_started = None;
    user.is_on_daily = None;
    user.is_timed = None;
    user.multiplier = 1;
    user.number_correct = 0;
    user.number_of_questions = None;
    user.points_earned_current_quest = 0;
    user.points_per_question = None;
    user.question_type = None;
}
