//! Named, reusable response checks.
//!
//! Each check comes in two forms: a function that adds its conditions to a
//! caller's [`Checks`] so several checks can share one report, and an
//! `assert_*` wrapper that runs it alone and panics with every failure.

mod collector;

pub use collector::{AssertionFailure, Checks};

use std::time::Duration;

use crate::{
    client::{ApiResponse, CONTENT_TYPE_JSON, CONTENT_TYPE_PROBLEM_JSON},
    traits::Resource,
    types::{
        author::Author,
        book::Book,
        error_response::{ErrorResponse, NOT_FOUND_TITLE, VALIDATION_TITLE},
        timestamp::Timestamp,
    },
};

pub fn has_required_fields<R: Resource>(checks: &mut Checks, resource: &R) {
    for (label, present) in resource.required_fields() {
        checks.check(present, format!("{label} should not be null"));
    }
}

#[track_caller]
pub fn assert_has_required_fields<R: Resource>(resource: &R) {
    let mut checks = Checks::new(format!("{} has required fields", R::NAME));
    has_required_fields(&mut checks, resource);
    checks.finish();
}

pub fn status_is(checks: &mut Checks, response: &ApiResponse, expected: u16) {
    checks.equal(
        &expected,
        &response.status_code(),
        format!("Status code should be {expected}"),
    );
}

pub fn content_type_is(checks: &mut Checks, response: &ApiResponse, expected: &str) {
    checks.check(
        response.has_content_type(expected),
        format!(
            "Content type should be {expected}, was: {:?}",
            response.content_type()
        ),
    );
}

pub fn responds_within(checks: &mut Checks, response: &ApiResponse, budget: Duration) {
    checks.check(
        response.time() < budget,
        format!(
            "Response time should be under {}ms, was: {}ms",
            budget.as_millis(),
            response.time().as_millis()
        ),
    );
}

/// Compares two timestamps by the instant they denote, so
/// `2024-01-01T00:00:00Z` and `2024-01-01T00:00:00.0000000+00:00` match.
pub fn same_instant(
    checks: &mut Checks,
    expected: Option<&str>,
    actual: Option<&str>,
    message: &str,
) {
    match (expected, actual) {
        (Some(expected), Some(actual)) => {
            let expected = checks.ok(
                Timestamp::parse(expected),
                format!("{message}: cannot parse expected {expected:?}"),
            );
            let actual = checks.ok(
                Timestamp::parse(actual),
                format!("{message}: cannot parse actual {actual:?}"),
            );
            if let (Some(expected), Some(actual)) = (expected, actual) {
                checks.equal(&expected, &actual, message);
            }
        }
        (expected, actual) => {
            checks.equal(&expected, &actual, message);
        }
    }
}

pub fn book_matches_expected(
    checks: &mut Checks,
    response: &ApiResponse,
    expected: &Book,
    actual: &Book,
) {
    status_is(checks, response, 200);
    content_type_is(checks, response, CONTENT_TYPE_JSON);
    checks
        .equal(&expected.id, &actual.id, "ID should match")
        .equal(&expected.title, &actual.title, "Title should match")
        .equal(
            &expected.description,
            &actual.description,
            "Description should match",
        )
        .equal(
            &expected.page_count,
            &actual.page_count,
            "Page count should match",
        )
        .equal(&expected.excerpt, &actual.excerpt, "Excerpt should match");
    same_instant(
        checks,
        expected.publish_date.as_deref(),
        actual.publish_date.as_deref(),
        "Publish date should match",
    );
}

#[track_caller]
pub fn assert_book_matches_expected(response: &ApiResponse, expected: &Book, actual: &Book) {
    let mut checks = Checks::new("Create new book");
    book_matches_expected(&mut checks, response, expected, actual);
    checks.finish();
}

pub fn author_matches_expected(
    checks: &mut Checks,
    response: &ApiResponse,
    expected: &Author,
    actual: &Author,
) {
    status_is(checks, response, 200);
    content_type_is(checks, response, CONTENT_TYPE_JSON);
    checks
        .equal(&expected.id, &actual.id, "ID should match")
        .equal(&expected.id_book, &actual.id_book, "Book ID should match")
        .equal(
            &expected.first_name,
            &actual.first_name,
            "First name should match",
        )
        .equal(
            &expected.last_name,
            &actual.last_name,
            "Last name should match",
        );
}

#[track_caller]
pub fn assert_author_matches_expected(response: &ApiResponse, expected: &Author, actual: &Author) {
    let mut checks = Checks::new("Create new author");
    author_matches_expected(&mut checks, response, expected, actual);
    checks.finish();
}

/// Status, content type, and the envelope fields every problem body shares.
/// Returns the decoded envelope when the body could be read.
fn problem_envelope(
    checks: &mut Checks,
    response: &ApiResponse,
    status: u16,
    title: &str,
) -> Option<ErrorResponse> {
    status_is(checks, response, status);
    content_type_is(checks, response, CONTENT_TYPE_PROBLEM_JSON);
    let error: ErrorResponse = checks.ok(
        response.deserialize(),
        "Error response body should decode",
    )?;
    checks
        .equal(
            &Some(i32::from(status)),
            &error.status,
            format!("Error response status should be {status}"),
        )
        .equal(
            &Some(title),
            &error.title.as_deref(),
            format!("Error response title should be '{title}'"),
        )
        .some(&error.error_type, "Error response type should not be null")
        .some(&error.trace_id, "Error response traceId should not be null")
        .check(
            error.trace_id.is_none() || error.has_trace_id(),
            "Error response traceId should not be empty",
        );
    Some(error)
}

pub fn not_found_response(checks: &mut Checks, response: &ApiResponse) {
    problem_envelope(checks, response, 404, NOT_FOUND_TITLE);
}

#[track_caller]
pub fn assert_not_found_response(response: &ApiResponse) {
    let mut checks = Checks::new("404 Not Found response");
    not_found_response(&mut checks, response);
    checks.finish();
}

/// `field` is the JSON path the service reports, e.g. `$.pageCount`.
pub fn bad_request_response(checks: &mut Checks, response: &ApiResponse, field: &str) {
    let Some(error) = problem_envelope(checks, response, 400, VALIDATION_TITLE) else {
        return;
    };
    checks.some(&error.errors, "Error response errors should not be null");
    if error.errors.is_some() {
        checks.check(
            error.has_error_for(field),
            format!("Expected validation error for field: {field}"),
        );
    }
}

#[track_caller]
pub fn assert_bad_request_response(response: &ApiResponse, field: &str) {
    let mut checks = Checks::new("400 Error: Bad Request");
    bad_request_response(&mut checks, response, field);
    checks.finish();
}
