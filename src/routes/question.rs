use serde::Serialize;
use std::collections::HashMap;
use tracing::{Level, event, info, instrument};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::store::Store;
use crate::types::category::Category;
use crate::types::pagination::{QUESTIONS_PER_PAGE, extract_page, paginate};
use crate::types::question::{NewQuestion, Question, QuestionId, QuestionsRequest};
use crate::types::search::SearchTerm;

/// One page of questions. `current_category` is always the first category
/// in store order; the plain listing has no selected category.
#[derive(Serialize, Debug)]
struct QuestionPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
    current_category: Option<Category>,
}

impl QuestionPage {
    fn new(questions: Vec<Question>, page: u32, categories: Vec<Category>) -> Self {
        QuestionPage {
            success: true,
            total_questions: questions.len(),
            questions: paginate(questions, page, QUESTIONS_PER_PAGE),
            current_category: categories.first().cloned(),
            categories,
        }
    }
}

#[derive(Serialize, Debug)]
struct Created {
    success: bool,
    created: QuestionId,
    total_questions: i64,
}

#[derive(Serialize, Debug)]
struct Deleted {
    success: bool,
    deleted: QuestionId,
    total_questions: i64,
}

#[instrument]
pub async fn get_questions(
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, "querying questions");
    let page = extract_page(&params);
    info!(page = page);

    let questions = store.get_questions().await.map_err(warp::reject::custom)?;
    let categories = store.get_categories().await.map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&QuestionPage::new(questions, page, categories)))
}

/// `POST /questions` either searches or creates, depending on the body.
pub async fn post_questions(
    params: HashMap<String, String>,
    store: Store,
    request: QuestionsRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    match request {
        QuestionsRequest::Search(search) => {
            search_questions(extract_page(&params), store, search.search_term).await
        }
        QuestionsRequest::Create(new_question) => add_question(store, new_question).await,
    }
}

#[instrument(skip(store))]
async fn search_questions(
    page: u32,
    store: Store,
    term: SearchTerm,
) -> Result<WithStatus<Json>, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, term = term.as_str(), "searching questions");
    let questions = store
        .search_questions(&term)
        .await
        .map_err(warp::reject::custom)?;
    let categories = store.get_categories().await.map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&QuestionPage::new(questions, page, categories)),
        StatusCode::OK,
    ))
}

async fn add_question(
    store: Store,
    new_question: NewQuestion,
) -> Result<WithStatus<Json>, warp::Rejection> {
    let question = match store.add_question(new_question).await {
        Ok(question) => question,
        Err(e) => return Err(warp::reject::custom(e)),
    };
    event!(target: "trivia_api", Level::INFO, id = question.id.0, "question added");
    let total_questions = store.count_questions().await.map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&Created {
            success: true,
            created: question.id,
            total_questions,
        }),
        StatusCode::CREATED,
    ))
}

pub async fn delete_question(id: i32, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let id = QuestionId(id);
    if let Err(e) = store.delete_question(id).await {
        return Err(warp::reject::custom(e));
    }
    event!(target: "trivia_api", Level::INFO, id = id.0, "question deleted");
    let total_questions = store.count_questions().await.map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&Deleted {
        success: true,
        deleted: id,
        total_questions,
    }))
}
