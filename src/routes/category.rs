use serde::Serialize;
use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::category::{Category, CategoryId};
use crate::types::pagination::{QUESTIONS_PER_PAGE, extract_page, paginate};
use crate::types::question::Question;

#[derive(Serialize, Debug)]
struct CategoryList {
    success: bool,
    categories: Vec<Category>,
    total_categories: usize,
}

#[derive(Serialize, Debug)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Category,
}

#[instrument]
pub async fn get_categories(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, "querying categories");
    match store.get_categories().await {
        Ok(categories) => Ok(warp::reply::json(&CategoryList {
            success: true,
            total_categories: categories.len(),
            categories,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument]
pub async fn get_category_questions(
    id: i32,
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let page = extract_page(&params);
    event!(
        target: "trivia_api",
        Level::INFO,
        category = id,
        page = page,
        "querying category questions"
    );

    let (category, questions) = store
        .questions_by_category(CategoryId(id))
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions: paginate(questions, page, QUESTIONS_PER_PAGE),
        current_category: category,
    }))
}
