// src/quest/generator.rs

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use crate::repo::ContentRepository;

use super::{
    NUMBER_OF_CHOICES, QUESTION_TYPE_DEFINITIONS, QUESTION_TYPE_RANDOM, QuestError,
};

/// One entry of the shuffled answer list. `index` is a choice index for
/// multiple-choice questions and a word index for definition questions.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub text: String,
    pub index: i64,
}

/// A fully assembled question. Carries the correct-answer identifier for the
/// session state; clients only ever see the [`PublicQuestion`] projection.
#[derive(Debug, Clone)]
pub struct GeneratedQuestion {
    pub prompt: String,
    pub answers: Vec<AnswerOption>,
    pub chapter_index: i64,
    pub question_type: i32,
    pub question_index: i64,
    pub correct_answer_index: i64,
}

impl GeneratedQuestion {
    pub fn public(&self) -> PublicQuestion {
        PublicQuestion {
            prompt: self.prompt.clone(),
            answers: self.answers.clone(),
            chapter_index: self.chapter_index,
            question_type: self.question_type,
        }
    }
}

/// Client-facing question DTO (excludes the correct answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub prompt: String,
    pub answers: Vec<AnswerOption>,
    pub chapter_index: i64,
    pub question_type: i32,
}

/// Assembles one ready-to-serve question from repository content.
///
/// Candidate sets are fetched whole and sampled uniformly in memory, so the
/// repository never needs to randomize and tests can seed the RNG.
pub struct QuestionGenerator<'a, R: ContentRepository> {
    repo: &'a R,
}

impl<'a, R: ContentRepository> QuestionGenerator<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Produces a question for the session's chapter, question type and
    /// cumulative setting. Type 1 draws from the word/definition pool, types
    /// 2 and 3 from the multiple-choice prompts of that type, and type 0
    /// picks one of those uniformly first.
    pub async fn generate(
        &self,
        chapter_index: i64,
        question_type: i32,
        cumulative: bool,
        rng: &mut (impl Rng + Send),
    ) -> Result<GeneratedQuestion, QuestError> {
        let question_type = if question_type == QUESTION_TYPE_RANDOM {
            rng.random_range(1..=3)
        } else {
            question_type
        };

        if question_type == QUESTION_TYPE_DEFINITIONS {
            self.definition_question(chapter_index, None, cumulative, rng)
                .await
        } else {
            self.multiple_choice(chapter_index, question_type, cumulative, rng)
                .await
        }
    }

    /// Draws a prompt of the given type, pairs its correct choice with
    /// randomly drawn distractors from the same prompt and shuffles the lot.
    pub async fn multiple_choice(
        &self,
        chapter_index: i64,
        prompt_type: i32,
        cumulative: bool,
        rng: &mut (impl Rng + Send),
    ) -> Result<GeneratedQuestion, QuestError> {
        let chapter_index = resolve_chapter(chapter_index, cumulative, rng);

        let prompts = self.repo.prompts(chapter_index, prompt_type).await?;
        let prompt = prompts.choose(rng).ok_or(QuestError::NoPrompt {
            chapter_index,
            question_type: prompt_type,
        })?;

        let all_choices = self.repo.choices(prompt.index).await?;
        let correct = all_choices
            .iter()
            .find(|c| c.correct)
            .ok_or(QuestError::NoCorrectChoice {
                question_index: prompt.index,
            })?;

        let incorrect: Vec<_> = all_choices.iter().filter(|c| !c.correct).collect();
        let distractors_needed = NUMBER_OF_CHOICES - 1;
        if incorrect.len() < distractors_needed {
            return Err(QuestError::InsufficientContent {
                chapter_index,
                needed: distractors_needed,
                available: incorrect.len(),
            });
        }

        let mut answers: Vec<AnswerOption> = incorrect
            .choose_multiple(rng, distractors_needed)
            .map(|c| AnswerOption {
                text: c.text.clone(),
                index: c.index,
            })
            .collect();
        answers.push(AnswerOption {
            text: correct.text.clone(),
            index: correct.index,
        });
        answers.shuffle(rng);

        Ok(GeneratedQuestion {
            prompt: prompt.text.clone(),
            answers,
            chapter_index,
            question_type: prompt_type,
            question_index: prompt.index,
            correct_answer_index: correct.index,
        })
    }

    /// Draws a spread of words from the chapter and builds either a
    /// "define the word" (style 0) or "name the word" (style 1) question
    /// around the first one. With no style given, a coin flip decides.
    pub async fn definition_question(
        &self,
        chapter_index: i64,
        style: Option<i32>,
        cumulative: bool,
        rng: &mut (impl Rng + Send),
    ) -> Result<GeneratedQuestion, QuestError> {
        let style = match style {
            Some(s @ (0 | 1)) => s,
            _ => rng.random_range(0..=1),
        };

        let chapter_index = resolve_chapter(chapter_index, cumulative, rng);

        let words = self.repo.words(chapter_index).await?;
        if words.is_empty() {
            return Err(QuestError::NoPrompt {
                chapter_index,
                question_type: QUESTION_TYPE_DEFINITIONS,
            });
        }
        if words.len() < NUMBER_OF_CHOICES {
            return Err(QuestError::InsufficientContent {
                chapter_index,
                needed: NUMBER_OF_CHOICES,
                available: words.len(),
            });
        }

        let drawn: Vec<_> = words.choose_multiple(rng, NUMBER_OF_CHOICES).collect();
        let subject = drawn[0];

        let (prompt, mut answers) = if style == 1 {
            // Prompt with the word, offer one definition per drawn word.
            let mut answers = Vec::with_capacity(NUMBER_OF_CHOICES);
            for word in &drawn {
                let definitions = self.repo.definitions(word.word_index).await?;
                let definition =
                    definitions
                        .choose(rng)
                        .ok_or(QuestError::NoDefinition {
                            word_index: word.word_index,
                        })?;
                answers.push(AnswerOption {
                    text: definition.definition.clone(),
                    index: word.word_index,
                });
            }
            (subject.word.clone(), answers)
        } else {
            // Prompt with a definition, offer the drawn words.
            let answers = drawn
                .iter()
                .map(|word| AnswerOption {
                    text: word.word.clone(),
                    index: word.word_index,
                })
                .collect();
            let definitions = self.repo.definitions(subject.word_index).await?;
            let definition = definitions
                .choose(rng)
                .ok_or(QuestError::NoDefinition {
                    word_index: subject.word_index,
                })?;
            (definition.definition.clone(), answers)
        };

        answers.shuffle(rng);

        Ok(GeneratedQuestion {
            prompt,
            answers,
            chapter_index,
            question_type: style,
            question_index: subject.word_index,
            correct_answer_index: subject.word_index,
        })
    }
}

/// Cumulative mode re-draws the chapter uniformly from `[1, requested]` with
/// probability one half per call; otherwise the requested chapter is used.
fn resolve_chapter(requested: i64, cumulative: bool, rng: &mut impl Rng) -> i64 {
    if cumulative && rng.random_bool(0.5) {
        rng.random_range(1..=requested)
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::InMemoryContent;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn content_with_prompt() -> (InMemoryContent, i64) {
        let mut content = InMemoryContent::new();
        let prompt_index = content.add_prompt(
            1,
            2,
            "Which unit measures force?",
            &[
                ("Newton", true),
                ("Joule", false),
                ("Watt", false),
                ("Pascal", false),
                ("Ampere", false),
            ],
        );
        (content, prompt_index)
    }

    fn content_with_words() -> InMemoryContent {
        let mut content = InMemoryContent::new();
        content.add_word(1, "velocity", &["rate of change of position"]);
        content.add_word(1, "momentum", &["mass times velocity"]);
        content.add_word(1, "torque", &["rotational force"]);
        content.add_word(1, "inertia", &["resistance to change in motion"]);
        content.add_word(1, "impulse", &["force integrated over time"]);
        content
    }

    #[tokio::test]
    async fn multiple_choice_has_one_correct_and_unique_identifiers() {
        let (content, _) = content_with_prompt();
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(7);

        let question = generator
            .multiple_choice(1, 2, false, &mut rng)
            .await
            .unwrap();

        assert_eq!(question.answers.len(), NUMBER_OF_CHOICES);
        let mut seen = std::collections::HashSet::new();
        for answer in &question.answers {
            assert!(seen.insert(answer.index), "duplicate answer identifier");
        }
        assert!(
            question
                .answers
                .iter()
                .any(|a| a.index == question.correct_answer_index),
            "correct answer missing from answer list"
        );
        assert_eq!(
            question
                .answers
                .iter()
                .filter(|a| a.text == "Newton")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn multiple_choice_fails_without_enough_distractors() {
        let mut content = InMemoryContent::new();
        content.add_prompt(1, 2, "Short prompt", &[("right", true), ("wrong", false)]);
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(1);

        let result = generator.multiple_choice(1, 2, false, &mut rng).await;
        assert!(matches!(
            result,
            Err(QuestError::InsufficientContent { needed: 3, available: 1, .. })
        ));
    }

    #[tokio::test]
    async fn empty_chapter_is_a_hard_error() {
        let content = InMemoryContent::new();
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(1);

        let result = generator.multiple_choice(9, 2, false, &mut rng).await;
        assert!(matches!(result, Err(QuestError::NoPrompt { .. })));
    }

    #[tokio::test]
    async fn define_the_word_prompts_with_a_definition() {
        let content = content_with_words();
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(3);

        let question = generator
            .definition_question(1, Some(0), false, &mut rng)
            .await
            .unwrap();

        assert_eq!(question.question_type, 0);
        assert_eq!(question.answers.len(), NUMBER_OF_CHOICES);
        // Style 0 prompts with a definition and offers words as answers.
        assert!(question.prompt.contains(' '), "expected a definition prompt");
        let words = ["velocity", "momentum", "torque", "inertia", "impulse"];
        for answer in &question.answers {
            assert!(words.contains(&answer.text.as_str()));
        }
        let mut seen = std::collections::HashSet::new();
        assert!(question.answers.iter().all(|a| seen.insert(a.index)));
    }

    #[tokio::test]
    async fn name_the_word_prompts_with_the_word() {
        let content = content_with_words();
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(4);

        let question = generator
            .definition_question(1, Some(1), false, &mut rng)
            .await
            .unwrap();

        assert_eq!(question.question_type, 1);
        // Style 1 prompts with the word the correct definition belongs to.
        let words = ["velocity", "momentum", "torque", "inertia", "impulse"];
        assert!(words.contains(&question.prompt.as_str()));
        assert!(
            question
                .answers
                .iter()
                .any(|a| a.index == question.correct_answer_index)
        );
    }

    #[tokio::test]
    async fn definition_question_needs_four_words() {
        let mut content = InMemoryContent::new();
        content.add_word(1, "velocity", &["rate of change of position"]);
        content.add_word(1, "momentum", &["mass times velocity"]);
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(5);

        let result = generator.definition_question(1, Some(0), false, &mut rng).await;
        assert!(matches!(
            result,
            Err(QuestError::InsufficientContent { needed: 4, available: 2, .. })
        ));
    }

    #[tokio::test]
    async fn correct_answer_position_is_roughly_uniform() {
        let (content, _) = content_with_prompt();
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(99);

        let trials = 4000;
        let mut position_counts = [0usize; NUMBER_OF_CHOICES];
        for _ in 0..trials {
            let question = generator
                .multiple_choice(1, 2, false, &mut rng)
                .await
                .unwrap();
            let position = question
                .answers
                .iter()
                .position(|a| a.index == question.correct_answer_index)
                .expect("correct answer present");
            position_counts[position] += 1;
        }

        let expected = trials / NUMBER_OF_CHOICES;
        for (slot, count) in position_counts.iter().enumerate() {
            assert!(
                (*count as i64 - expected as i64).abs() < (expected / 4) as i64,
                "slot {} saw {} of {} trials",
                slot,
                count,
                trials
            );
        }
    }

    #[tokio::test]
    async fn cumulative_mode_draws_from_earlier_chapters() {
        let mut content = InMemoryContent::new();
        for chapter in 1..=4 {
            content.add_prompt(
                chapter,
                2,
                "prompt",
                &[("a", true), ("b", false), ("c", false), ("d", false)],
            );
        }
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(11);

        let mut chapters_seen: HashMap<i64, usize> = HashMap::new();
        for _ in 0..400 {
            let question = generator.multiple_choice(4, 2, true, &mut rng).await.unwrap();
            assert!((1..=4).contains(&question.chapter_index));
            *chapters_seen.entry(question.chapter_index).or_insert(0) += 1;
        }

        // Half the draws stay on chapter 4, the rest spread over 1..=4.
        assert!(chapters_seen.len() > 1, "cumulative never left chapter 4");
        assert!(chapters_seen[&4] > 100);
    }

    #[tokio::test]
    async fn non_cumulative_mode_stays_on_the_requested_chapter() {
        let mut content = InMemoryContent::new();
        for chapter in 1..=4 {
            content.add_prompt(
                chapter,
                2,
                "prompt",
                &[("a", true), ("b", false), ("c", false), ("d", false)],
            );
        }
        let generator = QuestionGenerator::new(&content);
        let mut rng = StdRng::seed_from_u64(12);

        for _ in 0..50 {
            let question = generator.multiple_choice(3, 2, false, &mut rng).await.unwrap();
            assert_eq!(question.chapter_index, 3);
        }
    }
}
