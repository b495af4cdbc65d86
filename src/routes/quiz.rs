use serde::Serialize;
use tracing::{Level, event, instrument};
use warp::hyper::body::Bytes;

use handle_errors::Error;

use crate::store::Store;
use crate::types::question::Question;
use crate::types::quiz::QuizRequest;

#[derive(Serialize, Debug)]
struct NextQuestion {
    success: bool,
    question: Option<Question>,
}

/// Serves one unseen question, or `null` once the category is used up. The
/// body is decoded here so a malformed request reports not found.
#[instrument(skip(store))]
pub async fn next_question(store: Store, body: Bytes) -> Result<impl warp::Reply, warp::Rejection> {
    let request: QuizRequest = serde_json::from_slice(&body)
        .map_err(|e| warp::reject::custom(Error::MalformedQuizRequest(e)))?;
    let scope = request.scope();
    event!(
        target: "trivia_api",
        Level::INFO,
        scope = ?scope,
        previous = request.previous_questions.len(),
        "drawing quiz question"
    );

    let question = store
        .next_quiz_question(scope, &request.previous_questions)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&NextQuestion {
        success: true,
        question,
    }))
}
