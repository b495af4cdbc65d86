use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, Ord, PartialOrd)]
pub struct CategoryId(pub i32);

impl CategoryId {
    /// Questions reference their category by the string form of its id.
    pub fn as_key(&self) -> String {
        self.0.to_string()
    }
}

impl Category {
    pub fn new(id: i32, kind: &str) -> Self {
        Category {
            id: CategoryId(id),
            kind: kind.to_string(),
        }
    }
}

/// The categories every trivia store starts out with.
pub fn default_categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .zip(1..)
        .map(|(kind, id)| Category::new(id, kind))
        .collect()
}
