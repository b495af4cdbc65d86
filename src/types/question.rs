use serde::{Deserialize, Deserializer, Serialize};

use crate::types::lenient::{int_or_string, string_or_int};
use crate::types::search::SearchTerm;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: String,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, Ord, PartialOrd)]
pub struct QuestionId(pub i32);

/// Body of a create request. Nothing beyond presence is checked: difficulty
/// range, empty text and the category reference pass through as sent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "int_or_string")]
    pub difficulty: i32,
    #[serde(deserialize_with = "string_or_int")]
    pub category: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", deserialize_with = "search_term")]
    pub search_term: SearchTerm,
}

fn search_term<'de, D>(deserializer: D) -> Result<SearchTerm, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_int(deserializer).map(|term| SearchTerm::new(&term))
}

/// `POST /questions` carries either a search or a new question; a string
/// `searchTerm` key selects the search.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum QuestionsRequest {
    Search(SearchRequest),
    Create(NewQuestion),
}
