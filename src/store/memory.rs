use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::types::{
    category::{Category, CategoryId},
    question::{NewQuestion, Question, QuestionId},
    quiz::QuizScope,
    search::SearchTerm,
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    last_id: i32,
}

/// Process-local store. Maps are keyed by id, so every listing comes back in
/// id order like the SQL queries do.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>) -> Self {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            ..Tables::default()
        };
        MemoryStore {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub async fn get_categories(&self) -> Vec<Category> {
        self.tables.read().await.categories.values().cloned().collect()
    }

    pub async fn get_category(&self, id: CategoryId) -> Option<Category> {
        self.tables.read().await.categories.get(&id).cloned()
    }

    pub async fn get_questions(&self) -> Vec<Question> {
        self.select(|_| true).await
    }

    pub async fn count_questions(&self) -> i64 {
        self.tables.read().await.questions.len() as i64
    }

    pub async fn search_questions(&self, term: &SearchTerm) -> Vec<Question> {
        self.select(|q| term.matches(&q.question)).await
    }

    pub async fn questions_in_category(&self, category: &Category) -> Vec<Question> {
        let key = category.id.as_key();
        self.select(|q| q.category == key).await
    }

    pub async fn add_question(&self, new_question: NewQuestion) -> Question {
        let mut tables = self.tables.write().await;
        tables.last_id += 1;
        let question = Question {
            id: QuestionId(tables.last_id),
            question: new_question.question,
            answer: new_question.answer,
            difficulty: new_question.difficulty,
            category: new_question.category,
        };
        tables.questions.insert(question.id, question.clone());
        question
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        match self.tables.write().await.questions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::QuestionNotFound(id.0)),
        }
    }

    pub async fn quiz_candidates(
        &self,
        scope: QuizScope,
        previous: &[QuestionId],
    ) -> Vec<Question> {
        let previous: HashSet<QuestionId> = previous.iter().copied().collect();
        self.select(|q| scope.admits(q) && !previous.contains(&q.id))
            .await
    }

    async fn select<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        self.tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| keep(q))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::types::category::default_categories;

    fn new_question(text: &str, category: &str) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            difficulty: 2,
            category: category.to_string(),
        }
    }

    async fn seeded() -> Store {
        let store = Store::in_memory(default_categories());
        for (text, category) in [
            ("La Giaconda is better known as what?", "2"),
            ("How many paintings did Van Gogh sell in his lifetime?", "2"),
            ("What is the heaviest organ in the human body?", "1"),
            ("Which country won the first ever soccer World Cup in 1930?", "6"),
        ] {
            store.add_question(new_question(text, category)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = seeded().await;
        let ids: Vec<i32> = store
            .get_questions()
            .await
            .unwrap()
            .iter()
            .map(|q| q.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.count_questions().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = seeded().await;
        store.delete_question(QuestionId(4)).await.unwrap();
        let q = store.add_question(new_question("Q", "1")).await.unwrap();
        assert_eq!(q.id, QuestionId(5));
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let store = seeded().await;
        store.delete_question(QuestionId(1)).await.unwrap();
        assert!(matches!(
            store.delete_question(QuestionId(1)).await,
            Err(Error::QuestionNotFound(1))
        ));
        assert_eq!(store.count_questions().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn search_looks_at_question_text_only() {
        let store = seeded().await;
        let hits = store.search_questions(&SearchTerm::new("VAN GOGH")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, QuestionId(2));

        assert!(
            store
                .search_questions(&SearchTerm::new("answer"))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.search_questions(&SearchTerm::new("")).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() {
        let store = Store::in_memory(default_categories());
        for text in ["Is 100% of the moon visible?", "Name a snake_case language", "Plain one"] {
            store.add_question(new_question(text, "1")).await.unwrap();
        }

        let hits = store.search_questions(&SearchTerm::new("100%")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, QuestionId(1));

        let hits = store.search_questions(&SearchTerm::new("e_c")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, QuestionId(2));

        assert_eq!(store.search_questions(&SearchTerm::new("%")).await.unwrap().len(), 1);
        assert!(store.search_questions(&SearchTerm::new("P_ain")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let store = seeded().await;
        assert!(matches!(
            store.questions_by_category(CategoryId(42)).await,
            Err(Error::CategoryNotFound(42))
        ));
    }

    #[tokio::test]
    async fn category_questions_share_the_key() {
        let store = seeded().await;
        let (category, questions) = store.questions_by_category(CategoryId(2)).await.unwrap();
        assert_eq!(category.kind, "Art");
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category == "2"));

        let (_, questions) = store.questions_by_category(CategoryId(3)).await.unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn quiz_runs_until_exhausted() {
        let store = seeded().await;
        let mut previous = Vec::new();
        while let Some(q) = store
            .next_quiz_question(QuizScope::AnyCategory, &previous)
            .await
            .unwrap()
        {
            assert!(!previous.contains(&q.id));
            previous.push(q.id);
        }
        previous.sort();
        assert_eq!(previous, (1..=4).map(QuestionId).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn quiz_stays_in_its_category() {
        let store = seeded().await;
        let scope = QuizScope::Category(CategoryId(2));
        let first = store.next_quiz_question(scope, &[]).await.unwrap().unwrap();
        assert_eq!(first.category, "2");
        let second = store
            .next_quiz_question(scope, &[first.id])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.category, "2");
        assert_ne!(first.id, second.id);
        assert_eq!(
            store
                .next_quiz_question(scope, &[first.id, second.id])
                .await
                .unwrap(),
            None
        );
    }
}
