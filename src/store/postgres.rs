use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use tracing::{Level, event};

use handle_errors::Error;

use crate::types::{
    category::{Category, CategoryId},
    question::{NewQuestion, Question, QuestionId},
    quiz::QuizScope,
    search::SearchTerm,
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

fn to_question(row: PgRow) -> Question {
    Question {
        id: QuestionId(row.get("id")),
        question: row.get("question"),
        answer: row.get("answer"),
        difficulty: row.get("difficulty"),
        category: row.get("category"),
    }
}

fn to_category(row: PgRow) -> Category {
    Category {
        id: CategoryId(row.get("id")),
        kind: row.get("type"),
    }
}

fn query_error(error: sqlx::Error) -> Error {
    event!(Level::ERROR, "{:?}", error);
    Error::DatabaseQueryError(error)
}

impl PgStore {
    pub async fn new(db_url: &str, max_connections: u32) -> Result<Self, Error> {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await
        {
            Ok(pool) => Ok(PgStore { connection: pool }),
            Err(e) => {
                event!(Level::ERROR, "Cannot reach the database: {}", e);
                Err(Error::DatabaseConnectionError(e))
            }
        }
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .map(to_category)
            .fetch_all(&self.connection)
            .await
            .map_err(query_error)
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, Error> {
        sqlx::query("SELECT id, type FROM categories WHERE id = $1")
            .bind(id.0)
            .map(to_category)
            .fetch_optional(&self.connection)
            .await
            .map_err(query_error)
    }

    pub async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        sqlx::query("SELECT id, question, answer, difficulty, category FROM questions ORDER BY id")
            .map(to_question)
            .fetch_all(&self.connection)
            .await
            .map_err(query_error)
    }

    pub async fn count_questions(&self) -> Result<i64, Error> {
        sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .map(|row: PgRow| row.get::<i64, _>("total"))
            .fetch_one(&self.connection)
            .await
            .map_err(query_error)
    }

    pub async fn search_questions(&self, term: &SearchTerm) -> Result<Vec<Question>, Error> {
        sqlx::query(
            "SELECT id, question, answer, difficulty, category FROM questions
            WHERE question ILIKE $1 ESCAPE '\\'
            ORDER BY id",
        )
        .bind(term.like_pattern())
        .map(to_question)
        .fetch_all(&self.connection)
        .await
        .map_err(query_error)
    }

    pub async fn questions_in_category(&self, category: &Category) -> Result<Vec<Question>, Error> {
        sqlx::query(
            "SELECT id, question, answer, difficulty, category FROM questions
            WHERE category = $1
            ORDER BY id",
        )
        .bind(category.id.as_key())
        .map(to_question)
        .fetch_all(&self.connection)
        .await
        .map_err(query_error)
    }

    pub async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        match sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, difficulty, category",
        )
        .bind(new_question.question)
        .bind(new_question.answer)
        .bind(new_question.difficulty)
        .bind(new_question.category)
        .map(to_question)
        .fetch_one(&self.connection)
        .await
        {
            Ok(question) => Ok(question),
            Err(error) => Err(query_error(error)),
        }
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        match sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.0)
            .execute(&self.connection)
            .await
        {
            Ok(done) if done.rows_affected() == 0 => Err(Error::QuestionNotFound(id.0)),
            Ok(_) => Ok(()),
            Err(error) => Err(query_error(error)),
        }
    }

    pub async fn quiz_candidates(
        &self,
        scope: QuizScope,
        previous: &[QuestionId],
    ) -> Result<Vec<Question>, Error> {
        let previous: Vec<i32> = previous.iter().map(|id| id.0).collect();
        let query = match scope {
            QuizScope::AnyCategory => sqlx::query(
                "SELECT id, question, answer, difficulty, category FROM questions
                WHERE NOT (id = ANY($1))
                ORDER BY id",
            )
            .bind(previous),
            QuizScope::Category(id) => sqlx::query(
                "SELECT id, question, answer, difficulty, category FROM questions
                WHERE category = $1 AND NOT (id = ANY($2))
                ORDER BY id",
            )
            .bind(id.as_key())
            .bind(previous),
        };

        query
            .map(to_question)
            .fetch_all(&self.connection)
            .await
            .map_err(query_error)
    }
}
