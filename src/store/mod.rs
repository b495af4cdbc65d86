use handle_errors::Error;
use tracing::instrument;

use crate::types::{
    category::{Category, CategoryId},
    question::{NewQuestion, Question, QuestionId},
    quiz::{QuizScope, pick_question},
    search::SearchTerm,
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Handle to wherever questions and categories live. Clones share the
/// underlying pool or tables.
#[derive(Debug, Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn in_memory(categories: Vec<Category>) -> Self {
        Store::Memory(MemoryStore::new(categories))
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        match self {
            Store::Postgres(db) => db.get_categories().await,
            Store::Memory(mem) => Ok(mem.get_categories().await),
        }
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, Error> {
        match self {
            Store::Postgres(db) => db.get_category(id).await,
            Store::Memory(mem) => Ok(mem.get_category(id).await),
        }
    }

    pub async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        match self {
            Store::Postgres(db) => db.get_questions().await,
            Store::Memory(mem) => Ok(mem.get_questions().await),
        }
    }

    pub async fn count_questions(&self) -> Result<i64, Error> {
        match self {
            Store::Postgres(db) => db.count_questions().await,
            Store::Memory(mem) => Ok(mem.count_questions().await),
        }
    }

    pub async fn search_questions(&self, term: &SearchTerm) -> Result<Vec<Question>, Error> {
        match self {
            Store::Postgres(db) => db.search_questions(term).await,
            Store::Memory(mem) => Ok(mem.search_questions(term).await),
        }
    }

    pub async fn questions_in_category(&self, category: &Category) -> Result<Vec<Question>, Error> {
        match self {
            Store::Postgres(db) => db.questions_in_category(category).await,
            Store::Memory(mem) => Ok(mem.questions_in_category(category).await),
        }
    }

    pub async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        match self {
            Store::Postgres(db) => db.add_question(new_question).await,
            Store::Memory(mem) => Ok(mem.add_question(new_question).await),
        }
    }

    /// Fails with `QuestionNotFound` when no question had this id.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        match self {
            Store::Postgres(db) => db.delete_question(id).await,
            Store::Memory(mem) => mem.delete_question(id).await,
        }
    }

    pub async fn quiz_candidates(
        &self,
        scope: QuizScope,
        previous: &[QuestionId],
    ) -> Result<Vec<Question>, Error> {
        match self {
            Store::Postgres(db) => db.quiz_candidates(scope, previous).await,
            Store::Memory(mem) => Ok(mem.quiz_candidates(scope, previous).await),
        }
    }

    /// Resolves a category and every question filed under it.
    #[instrument(skip(self))]
    pub async fn questions_by_category(
        &self,
        id: CategoryId,
    ) -> Result<(Category, Vec<Question>), Error> {
        let category = self
            .get_category(id)
            .await?
            .ok_or(Error::CategoryNotFound(id.0))?;
        let questions = self.questions_in_category(&category).await?;
        Ok((category, questions))
    }

    /// Draws one question in `scope` that is not in `previous`.
    #[instrument(skip(self))]
    pub async fn next_quiz_question(
        &self,
        scope: QuizScope,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, Error> {
        let candidates = self.quiz_candidates(scope, previous).await?;
        tracing::debug!(candidates = candidates.len());
        Ok(pick_question(candidates, &mut rand::thread_rng()))
    }
}
