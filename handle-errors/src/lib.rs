use serde::Serialize;
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::Reject,
};

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    QuestionNotFound(i32),
    CategoryNotFound(i32),
    MalformedQuizRequest(serde_json::Error),
    DatabaseQueryError(sqlx::Error),
    DatabaseConnectionError(sqlx::Error),
    ConfigError(config::ConfigError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::QuestionNotFound(id) => {
                write!(f, "Question {} not found", id)
            }
            Error::CategoryNotFound(id) => {
                write!(f, "Category {} not found", id)
            }
            Error::MalformedQuizRequest(err) => {
                write!(f, "Cannot read quiz request: {}", err)
            }
            Error::DatabaseQueryError(_) => {
                write!(f, "Cannot query the store")
            }
            Error::DatabaseConnectionError(err) => {
                write!(f, "Cannot connect to the database: {}", err)
            }
            Error::ConfigError(err) => {
                write!(f, "Cannot load configuration: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Reject for Error {}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::ConfigError(err)
    }
}

/// Wire shape shared by every failure response.
#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    success: bool,
    error: u16,
    message: &'a str,
}

pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const UNPROCESSABLE_MESSAGE: &str = "unprocessable";

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        }),
        status,
    )
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = r.find::<Error>() {
        match error {
            Error::QuestionNotFound(_)
            | Error::CategoryNotFound(_)
            | Error::MalformedQuizRequest(_) => {
                event!(Level::WARN, "{}", error);
                Ok(error_reply(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE))
            }
            Error::DatabaseQueryError(e) => {
                event!(Level::ERROR, "Database query error: {:?}", e);
                Ok(error_reply(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    UNPROCESSABLE_MESSAGE,
                ))
            }
            _ => {
                event!(Level::ERROR, "{}", error);
                Ok(error_reply(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    UNPROCESSABLE_MESSAGE,
                ))
            }
        }
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(error_reply(StatusCode::FORBIDDEN, &error.to_string()))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::ERROR, "Cannot deserialize request body: {}", error);
        Ok(error_reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            UNPROCESSABLE_MESSAGE,
        ))
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(error_reply(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE))
    }
}
