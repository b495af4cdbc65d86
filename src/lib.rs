#![warn(clippy::all)]

use handle_errors::return_error;
use tracing::info;
use warp::{Filter, Rejection, Reply, http::Method};

pub mod config;
pub mod routes;
pub mod store;
pub mod types;

use crate::config::{Config, StoreKind};
use crate::store::{PgStore, Store};
use crate::types::category::default_categories;

pub async fn setup_store(config: &Config) -> Result<Store, handle_errors::Error> {
    match config.store {
        StoreKind::Memory => {
            info!("using the in-memory store");
            Ok(Store::in_memory(default_categories()))
        }
        StoreKind::Postgres => {
            info!(
                host = config.database.host.as_str(),
                database = config.database.name.as_str(),
                "connecting to postgres"
            );
            let db = PgStore::new(&config.database.url(), config.database.max_connections).await?;
            Ok(Store::Postgres(db))
        }
    }
}

pub fn build_routes(store: Store) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type", "Authorization"])
        .allow_methods(&[
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    let get_categories = warp::get()
        .and(warp::path("api"))
        .and(warp::path("categories"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::category::get_categories);

    let get_category_questions = warp::get()
        .and(warp::path("api"))
        .and(warp::path("categories"))
        .and(warp::path::param::<i32>())
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::category::get_category_questions);

    let get_questions = warp::get()
        .and(warp::path("api"))
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::question::get_questions);

    let post_questions = warp::post()
        .and(warp::path("api"))
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::post_questions);

    let delete_question = warp::delete()
        .and(warp::path("api"))
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::question::delete_question);

    let next_question = warp::post()
        .and(warp::path("api"))
        .and(warp::path("quizzes"))
        .and(warp::path::end())
        .and(store_filter)
        .and(warp::body::bytes())
        .and_then(routes::quiz::next_question);

    get_categories
        .or(get_category_questions)
        .or(get_questions)
        .or(post_questions)
        .or(delete_question)
        .or(next_question)
        .recover(return_error)
        .with(cors)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        // CORS refusals are raised by the wrapper, outside the inner recover.
        .recover(return_error)
}

pub async fn run(config: Config, store: Store) {
    let routes = build_routes(store);
    info!(host = %config.host, port = config.port, "trivia api listening");
    warp::serve(routes).run((config.host, config.port)).await;
}
