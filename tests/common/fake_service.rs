//! In-process stand-in for the Books/Authors API, so the suite runs without
//! network access. Behaves like the public deployment: reads come from a
//! fixed seed, writes are validated and echoed but never stored.

use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize, Serializer};
use tracing::{debug, error, info};
use uuid::Uuid;

const BOOK_COUNT: i32 = 200;
const AUTHORS_PER_BOOK: i32 = 2;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8; v=1.0";
const PROBLEM_CONTENT_TYPE: &str = "application/problem+json; charset=utf-8";

const NOT_FOUND_TYPE: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.4";
const BAD_REQUEST_TYPE: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookRecord {
    id:           i32,
    title:        Option<String>,
    description:  Option<String>,
    page_count:   i32,
    excerpt:      Option<String>,
    #[serde(serialize_with = "dotnet_timestamp")]
    publish_date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorRecord {
    id:         i32,
    id_book:    i32,
    first_name: Option<String>,
    last_name:  Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    #[serde(rename = "type")]
    kind:     &'static str,
    title:    &'static str,
    status:   u16,
    trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors:   Option<BTreeMap<String, Vec<String>>>,
}

struct Seed {
    books:   Vec<BookRecord>,
    authors: Vec<AuthorRecord>,
}

impl Seed {
    fn new() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let books = (1..=BOOK_COUNT)
            .map(|id| BookRecord {
                id,
                title: Some(format!("Book {id}")),
                description: Some(format!("Description of book {id}.")),
                page_count: id * 100,
                excerpt: Some(format!("Excerpt from book {id}.")),
                publish_date: (epoch - Duration::days(i64::from(id))).into(),
            })
            .collect();
        let authors = (1..=BOOK_COUNT * AUTHORS_PER_BOOK)
            .map(|id| AuthorRecord {
                id,
                id_book: (id - 1) / AUTHORS_PER_BOOK + 1,
                first_name: Some(format!("First Name {id}")),
                last_name: Some(format!("Last Name {id}")),
            })
            .collect();
        Self { books, authors }
    }
}

/// Serves the API on an ephemeral localhost port for the rest of the
/// current runtime's life and returns its base URL.
pub async fn start() -> anyhow::Result<String> {
    let state = Arc::new(Seed::new());

    let app = Router::new()
        .route("/api/v1/Books", get(list_books).post(create_book))
        .route(
            "/api/v1/Books/:id",
            get(book).put(update_book).delete(delete),
        )
        .route("/api/v1/Authors", get(list_authors).post(create_author))
        .route(
            "/api/v1/Authors/:id",
            get(author).put(update_author).delete(delete),
        )
        .route("/api/v1/Authors/authors/books/:id_book", get(authors_by_book))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let addr = server.local_addr();
    info!("Fake service listening on {addr}.");
    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Fake service stopped: {e}");
        }
    });
    Ok(format!("http://{addr}"))
}

async fn list_books(State(seed): State<Arc<Seed>>) -> Response {
    json(&seed.books)
}

async fn book(Path(id): Path<i32>, State(seed): State<Arc<Seed>>) -> Response {
    match seed.books.iter().find(|b| b.id == id) {
        Some(book) => json(book),
        None => not_found(),
    }
}

async fn create_book(body: Bytes) -> Response {
    echo::<BookRecord>(&body, "book")
}

async fn update_book(Path(_id): Path<i32>, body: Bytes) -> Response {
    echo::<BookRecord>(&body, "book")
}

async fn list_authors(State(seed): State<Arc<Seed>>) -> Response {
    json(&seed.authors)
}

async fn author(Path(id): Path<i32>, State(seed): State<Arc<Seed>>) -> Response {
    match seed.authors.iter().find(|a| a.id == id) {
        Some(author) => json(author),
        None => not_found(),
    }
}

async fn authors_by_book(Path(id_book): Path<i32>, State(seed): State<Arc<Seed>>) -> Response {
    let authors: Vec<_> = seed
        .authors
        .iter()
        .filter(|a| a.id_book == id_book)
        .collect();
    json(&authors)
}

async fn create_author(body: Bytes) -> Response {
    echo::<AuthorRecord>(&body, "author")
}

async fn update_author(Path(_id): Path<i32>, body: Bytes) -> Response {
    echo::<AuthorRecord>(&body, "author")
}

async fn delete(Path(id): Path<i32>) -> Response {
    debug!("Pretending to delete {id}.");
    StatusCode::OK.into_response()
}

/// Validates `body` as `T` and sends it back re-serialized, the way the
/// public API acknowledges writes it never persists.
fn echo<T: Serialize + DeserializeOwned>(body: &[u8], model: &str) -> Response {
    let de = &mut serde_json::Deserializer::from_slice(body);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(record) => json(&record),
        Err(e) => {
            let path = e.path().to_string();
            let field = if path == "." {
                "$".to_string()
            } else {
                format!("$.{path}")
            };
            debug!("Rejecting {model}: {field}: {}", e.inner());
            let errors = BTreeMap::from([
                (
                    field.clone(),
                    vec![format!(
                        "The JSON value could not be converted. Path: {field} | {}",
                        e.inner()
                    )],
                ),
                (
                    model.to_string(),
                    vec![format!("The {model} field is required.")],
                ),
            ]);
            problem(
                StatusCode::BAD_REQUEST,
                BAD_REQUEST_TYPE,
                "One or more validation errors occurred.",
                Some(errors),
            )
        }
    }
}

fn json<T: Serialize + ?Sized>(body: &T) -> Response {
    let mut response = Json(body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}

fn not_found() -> Response {
    problem(StatusCode::NOT_FOUND, NOT_FOUND_TYPE, "Not Found", None)
}

fn problem(
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    errors: Option<BTreeMap<String, Vec<String>>>,
) -> Response {
    let body = Problem {
        kind,
        title,
        status: status.as_u16(),
        trace_id: trace_id(),
        errors,
    };
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
    );
    response
}

/// W3C trace-context shaped: `00-<32 hex>-<16 hex>-00`.
fn trace_id() -> String {
    let trace = Uuid::new_v4().simple().to_string();
    let span = Uuid::new_v4().simple().to_string();
    format!("00-{trace}-{}-00", &span[..16])
}

/// Seven fractional digits and an explicit `+00:00`, as .NET renders a
/// `DateTimeOffset`.
fn dotnet_timestamp<S: Serializer>(
    date: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let utc = date.with_timezone(&Utc);
    let rendered = format!(
        "{}.{:07}+00:00",
        utc.format("%Y-%m-%dT%H:%M:%S"),
        utc.timestamp_subsec_nanos() / 100
    );
    serializer.serialize_str(&rendered)
}
