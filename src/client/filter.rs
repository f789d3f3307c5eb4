//! Hooks that see every request and response going through a
//! [`RequestSpec`](super::RequestSpec).

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    client::{
        response::ApiResponse, AUTHORS_BY_BOOK_ID_PATH, CONTENT_TYPE_JSON,
        CONTENT_TYPE_PROBLEM_JSON,
    },
    traits::Resource,
    types::{author::Author, book::Book, error_response::ErrorResponse},
    Error, Result,
};

/// What a filter knows about the outgoing request.
#[derive(Debug, Clone, Copy)]
pub struct RequestRecord<'a> {
    pub step:     &'a str,
    pub method:   &'a Method,
    pub template: &'a str,
    pub url:      &'a str,
    pub query:    &'a [(String, String)],
    pub body:     Option<&'a [u8]>,
}

impl RequestRecord<'_> {
    /// `METHOD /path/{template}`
    pub fn operation(&self) -> String {
        format!("{} {}", self.method, self.template)
    }
}

pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_request(&self, _request: &RequestRecord<'_>) {}

    /// Returning `Err` turns the whole call into an error.
    fn on_response(&self, _request: &RequestRecord<'_>, _response: &ApiResponse) -> Result<()> {
        Ok(())
    }
}

/// Full request/response logging at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFilter;

impl Filter for LoggingFilter {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn on_request(&self, request: &RequestRecord<'_>) {
        debug!(
            method = %request.method,
            url = request.url,
            query = ?request.query,
            body = %request.body.map(String::from_utf8_lossy).unwrap_or_default(),
            "request"
        );
    }

    fn on_response(&self, _request: &RequestRecord<'_>, response: &ApiResponse) -> Result<()> {
        debug!(
            status = response.status_code(),
            elapsed_ms = response.time().as_millis() as u64,
            headers = ?response.headers(),
            body = %response.text(),
            "response"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Violations are computed and dropped.
    #[default]
    Ignore,
    Warn,
    Error,
}

type Check = fn(&ApiResponse) -> Vec<String>;

struct Contract {
    method:   Method,
    template: &'static str,
    check:    Check,
}

/// Compares responses against the published contract of each endpoint.
///
/// The service under test does not honour its own published schema, so the
/// suite runs this at [`ValidationLevel::Ignore`]. Raise the level when
/// pointing the suite at a conforming implementation.
pub struct SchemaValidationFilter {
    level:     ValidationLevel,
    contracts: Vec<Contract>,
}

impl SchemaValidationFilter {
    pub fn new(level: ValidationLevel) -> Self {
        Self {
            level,
            contracts: vec![],
        }
    }

    pub fn with_contract(mut self, method: Method, template: &'static str, check: Check) -> Self {
        self.contracts.push(Contract {
            method,
            template,
            check,
        });
        self
    }

    /// Contracts for every Books and Authors endpoint.
    pub fn books_and_authors(level: ValidationLevel) -> Self {
        Self::new(level)
            .with_contract(Method::GET, Book::COLLECTION_PATH, collection::<Book>)
            .with_contract(Method::POST, Book::COLLECTION_PATH, item::<Book>)
            .with_contract(Method::GET, Book::ITEM_PATH, item::<Book>)
            .with_contract(Method::PUT, Book::ITEM_PATH, item::<Book>)
            .with_contract(Method::DELETE, Book::ITEM_PATH, deleted)
            .with_contract(Method::GET, Author::COLLECTION_PATH, collection::<Author>)
            .with_contract(Method::POST, Author::COLLECTION_PATH, item::<Author>)
            .with_contract(Method::GET, Author::ITEM_PATH, item::<Author>)
            .with_contract(Method::PUT, Author::ITEM_PATH, item::<Author>)
            .with_contract(Method::DELETE, Author::ITEM_PATH, deleted)
            .with_contract(Method::GET, AUTHORS_BY_BOOK_ID_PATH, collection::<Author>)
    }

    pub fn level(&self) -> ValidationLevel {
        self.level
    }

    /// Violations for this exchange. Endpoints without a contract have none.
    pub fn violations(&self, request: &RequestRecord<'_>, response: &ApiResponse) -> Vec<String> {
        self.contracts
            .iter()
            .find(|c| c.method == *request.method && c.template == request.template)
            .map(|c| (c.check)(response))
            .unwrap_or_default()
    }
}

impl Filter for SchemaValidationFilter {
    fn name(&self) -> &'static str {
        "schema-validation"
    }

    fn on_response(&self, request: &RequestRecord<'_>, response: &ApiResponse) -> Result<()> {
        let violations = self.violations(request, response);
        if violations.is_empty() {
            return Ok(());
        }
        match self.level {
            ValidationLevel::Ignore => {
                trace!(operation = %request.operation(), ?violations, "schema violations ignored");
                Ok(())
            }
            ValidationLevel::Warn => {
                for violation in &violations {
                    warn!(operation = %request.operation(), "{violation}");
                }
                Ok(())
            }
            ValidationLevel::Error => Err(Error::SchemaViolation {
                operation: request.operation(),
                violations,
            }),
        }
    }
}

fn json_body<T: DeserializeOwned>(response: &ApiResponse, violations: &mut Vec<String>) -> Option<T> {
    if !response.has_content_type(CONTENT_TYPE_JSON) {
        violations.push(format!(
            "expected content type {CONTENT_TYPE_JSON}, got `{}`",
            response.content_type()
        ));
    }
    match response.deserialize::<T>() {
        Ok(body) => Some(body),
        Err(e) => {
            violations.push(e.to_string());
            None
        }
    }
}

fn missing_fields<R: Resource>(resource: &R, at: &str, violations: &mut Vec<String>) {
    for (field, present) in resource.required_fields() {
        if !present {
            violations.push(format!("{at}{field} is required"));
        }
    }
}

fn item<R: Resource>(response: &ApiResponse) -> Vec<String> {
    let mut violations = vec![];
    if response.status().is_success() {
        if let Some(resource) = json_body::<R>(response, &mut violations) {
            missing_fields(&resource, "", &mut violations);
        }
    } else if response.status().is_client_error() {
        problem(response, &mut violations);
    }
    violations
}

fn collection<R: Resource>(response: &ApiResponse) -> Vec<String> {
    let mut violations = vec![];
    if response.status().is_success() {
        if let Some(items) = json_body::<Vec<R>>(response, &mut violations) {
            for (i, resource) in items.iter().enumerate() {
                missing_fields(resource, &format!("[{i}] "), &mut violations);
            }
        }
    } else if response.status().is_client_error() {
        problem(response, &mut violations);
    }
    violations
}

fn deleted(response: &ApiResponse) -> Vec<String> {
    let mut violations = vec![];
    if response.status().is_success() {
        if !response.is_empty() {
            violations.push("expected an empty body".into());
        }
    } else if response.status().is_client_error() {
        problem(response, &mut violations);
    }
    violations
}

fn problem(response: &ApiResponse, violations: &mut Vec<String>) {
    if !response.has_content_type(CONTENT_TYPE_PROBLEM_JSON) {
        violations.push(format!(
            "expected content type {CONTENT_TYPE_PROBLEM_JSON}, got `{}`",
            response.content_type()
        ));
    }
    let error = match response.deserialize::<ErrorResponse>() {
        Ok(error) => error,
        Err(e) => {
            violations.push(e.to_string());
            return;
        }
    };
    if error.error_type.is_none() {
        violations.push("problem type is required".into());
    }
    if error.title.is_none() {
        violations.push("problem title is required".into());
    }
    if error.status != Some(i32::from(response.status_code())) {
        violations.push(format!(
            "problem status {:?} does not match http status {}",
            error.status,
            response.status_code()
        ));
    }
    if !error.has_trace_id() {
        violations.push("problem traceId is required".into());
    }
}
