use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::types::category::CategoryId;
use crate::types::lenient::int_or_string;
use crate::types::question::{Question, QuestionId};

/// Which questions a quiz draws from. On the wire, category id 0 stands for
/// every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    AnyCategory,
    Category(CategoryId),
}

impl From<i32> for QuizScope {
    fn from(id: i32) -> Self {
        match id {
            0 => QuizScope::AnyCategory,
            id => QuizScope::Category(CategoryId(id)),
        }
    }
}

impl QuizScope {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            QuizScope::AnyCategory => true,
            QuizScope::Category(id) => question.category == id.as_key(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QuizCategory {
    #[serde(deserialize_with = "int_or_string")]
    pub id: i32,
}

/// The client keeps the quiz session: every call resends all ids served so
/// far in `previous_questions`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QuizRequest {
    pub quiz_category: QuizCategory,
    pub previous_questions: Vec<QuestionId>,
}

impl QuizRequest {
    pub fn scope(&self) -> QuizScope {
        QuizScope::from(self.quiz_category.id)
    }
}

/// Uniform choice over `candidates`; `None` once the quiz is exhausted.
pub fn pick_question<R: Rng + ?Sized>(candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
    candidates.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i32, category: &str) -> Question {
        Question {
            id: QuestionId(id),
            question: format!("Question {}", id),
            answer: "answer".to_string(),
            difficulty: 1,
            category: category.to_string(),
        }
    }

    #[test]
    fn zero_is_any_category() {
        assert_eq!(QuizScope::from(0), QuizScope::AnyCategory);
        assert_eq!(QuizScope::from(3), QuizScope::Category(CategoryId(3)));
    }

    #[test]
    fn scope_filters_by_category_key() {
        let q = question(1, "2");
        assert!(QuizScope::AnyCategory.admits(&q));
        assert!(QuizScope::Category(CategoryId(2)).admits(&q));
        assert!(!QuizScope::Category(CategoryId(3)).admits(&q));
    }

    #[test]
    fn decodes_client_payloads() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"quiz_category": {"id": 0, "type": "click"}, "previous_questions": [4, 9]}"#,
        )
        .unwrap();
        assert_eq!(req.scope(), QuizScope::AnyCategory);
        assert_eq!(req.previous_questions, vec![QuestionId(4), QuestionId(9)]);

        let req: QuizRequest = serde_json::from_str(
            r#"{"quiz_category": {"id": "5", "type": "Sports"}, "previous_questions": []}"#,
        )
        .unwrap();
        assert_eq!(req.scope(), QuizScope::Category(CategoryId(5)));
    }

    #[test]
    fn missing_keys_do_not_decode() {
        assert!(serde_json::from_str::<QuizRequest>(r#"{"previous_questions": []}"#).is_err());
        assert!(serde_json::from_str::<QuizRequest>(r#"{"quiz_category": {"id": 1}}"#).is_err());
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_question(Vec::new(), &mut rng), None);
    }

    #[test]
    fn picks_reach_every_candidate() {
        let candidates: Vec<Question> = (1..=4).map(|id| question(id, "1")).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let q = pick_question(candidates.clone(), &mut rng).unwrap();
            assert!(candidates.contains(&q));
            seen.insert(q.id);
        }
        assert_eq!(seen.len(), candidates.len());
    }
}
