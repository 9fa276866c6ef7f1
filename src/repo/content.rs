// src/repo/content.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::question::{McChoice, McPrompt};
use crate::models::word::{Definition, Word};
use crate::quest::QuestError;

/// Read access to question content, keyed by chapter. The generator fetches
/// whole candidate sets and does its own uniform sampling, so implementations
/// return everything that matches and never randomize.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn prompts(
        &self,
        chapter_index: i64,
        question_type: i32,
    ) -> Result<Vec<McPrompt>, QuestError>;

    /// All choices belonging to one prompt, correct and incorrect.
    async fn choices(&self, question_index: i64) -> Result<Vec<McChoice>, QuestError>;

    async fn words(&self, chapter_index: i64) -> Result<Vec<Word>, QuestError>;

    async fn definitions(&self, word_index: i64) -> Result<Vec<Definition>, QuestError>;

    /// Bumps the times-chosen counter for a submitted choice. A miss (e.g. a
    /// definition answer, whose identifier is a word index) is not an error.
    async fn record_choice_selected(&self, choice_index: i64) -> Result<(), QuestError>;
}

/// Postgres-backed content repository.
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn prompts(
        &self,
        chapter_index: i64,
        question_type: i32,
    ) -> Result<Vec<McPrompt>, QuestError> {
        let prompts = sqlx::query_as::<_, McPrompt>(
            r#"
            SELECT "index", chapter_index, "type", text, img_path
            FROM mc_prompts
            WHERE chapter_index = $1 AND "type" = $2
            "#,
        )
        .bind(chapter_index)
        .bind(question_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    async fn choices(&self, question_index: i64) -> Result<Vec<McChoice>, QuestError> {
        let choices = sqlx::query_as::<_, McChoice>(
            r#"
            SELECT "index", question_index, text, correct, times_chosen
            FROM mc_choices
            WHERE question_index = $1
            "#,
        )
        .bind(question_index)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn words(&self, chapter_index: i64) -> Result<Vec<Word>, QuestError> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT word_index, chapter_index, word
            FROM words
            WHERE chapter_index = $1
            "#,
        )
        .bind(chapter_index)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    async fn definitions(&self, word_index: i64) -> Result<Vec<Definition>, QuestError> {
        let definitions = sqlx::query_as::<_, Definition>(
            r#"
            SELECT word_index, chapter_index, definition
            FROM definitions
            WHERE word_index = $1
            "#,
        )
        .bind(word_index)
        .fetch_all(&self.pool)
        .await?;

        Ok(definitions)
    }

    async fn record_choice_selected(&self, choice_index: i64) -> Result<(), QuestError> {
        sqlx::query(
            r#"
            UPDATE mc_choices
            SET times_chosen = times_chosen + 1
            WHERE "index" = $1
            "#,
        )
        .bind(choice_index)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
