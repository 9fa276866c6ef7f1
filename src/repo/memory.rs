// src/repo/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::question::{McChoice, McPrompt};
use crate::models::word::{Definition, Word};
use crate::quest::QuestError;

use super::content::ContentRepository;

/// In-memory content repository. Backs the engine tests and keeps the quest
/// core runnable without a database.
#[derive(Debug, Default)]
pub struct InMemoryContent {
    prompts: Vec<McPrompt>,
    choices: Vec<McChoice>,
    words: Vec<Word>,
    definitions: Vec<Definition>,
    next_index: i64,
    times_chosen: Mutex<HashMap<i64, i64>>,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prompt with its choices; `choices` pairs text with the
    /// correctness flag. Returns the prompt index.
    pub fn add_prompt(
        &mut self,
        chapter_index: i64,
        question_type: i32,
        text: &str,
        choices: &[(&str, bool)],
    ) -> i64 {
        let prompt_index = self.bump_index();
        self.prompts.push(McPrompt {
            index: prompt_index,
            chapter_index,
            question_type,
            text: text.to_string(),
            img_path: None,
        });
        for (choice_text, correct) in choices {
            let choice_index = self.bump_index();
            self.choices.push(McChoice {
                index: choice_index,
                question_index: prompt_index,
                text: choice_text.to_string(),
                correct: *correct,
                times_chosen: 0,
            });
        }
        prompt_index
    }

    /// Adds a word and its definitions. Returns the word index.
    pub fn add_word(&mut self, chapter_index: i64, word: &str, definitions: &[&str]) -> i64 {
        let word_index = self.bump_index();
        self.words.push(Word {
            word_index,
            chapter_index,
            word: word.to_string(),
        });
        for definition in definitions {
            self.definitions.push(Definition {
                word_index,
                chapter_index,
                definition: definition.to_string(),
            });
        }
        word_index
    }

    /// How often a choice was recorded as selected.
    pub fn times_chosen(&self, choice_index: i64) -> i64 {
        self.times_chosen
            .lock()
            .map(|counts| counts.get(&choice_index).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn bump_index(&mut self) -> i64 {
        self.next_index += 1;
        self.next_index
    }
}

#[async_trait]
impl ContentRepository for InMemoryContent {
    async fn prompts(
        &self,
        chapter_index: i64,
        question_type: i32,
    ) -> Result<Vec<McPrompt>, QuestError> {
        Ok(self
            .prompts
            .iter()
            .filter(|p| p.chapter_index == chapter_index && p.question_type == question_type)
            .cloned()
            .collect())
    }

    async fn choices(&self, question_index: i64) -> Result<Vec<McChoice>, QuestError> {
        Ok(self
            .choices
            .iter()
            .filter(|c| c.question_index == question_index)
            .cloned()
            .collect())
    }

    async fn words(&self, chapter_index: i64) -> Result<Vec<Word>, QuestError> {
        Ok(self
            .words
            .iter()
            .filter(|w| w.chapter_index == chapter_index)
            .cloned()
            .collect())
    }

    async fn definitions(&self, word_index: i64) -> Result<Vec<Definition>, QuestError> {
        Ok(self
            .definitions
            .iter()
            .filter(|d| d.word_index == word_index)
            .cloned()
            .collect())
    }

    async fn record_choice_selected(&self, choice_index: i64) -> Result<(), QuestError> {
        if self.choices.iter().any(|c| c.index == choice_index) {
            if let Ok(mut counts) = self.times_chosen.lock() {
                *counts.entry(choice_index).or_insert(0) += 1;
            }
        }
        Ok(())
    }
}
