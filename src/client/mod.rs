//! Request building and sending.
//!
//! A [`RequestSpec`] carries everything every call shares: base URL, JSON
//! content negotiation, timeouts and the [`Filter`] chain. A [`Call`]
//! describes one request against a path template. The per-resource services
//! in [`service`] are thin wrappers that turn API operations into calls.

pub mod filter;
pub mod response;
pub mod service;

use std::{fmt::Display, sync::Arc, time::Instant};

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

use crate::{config::Config, Error, Result};

pub use filter::{Filter, LoggingFilter, RequestRecord, SchemaValidationFilter, ValidationLevel};
pub use response::ApiResponse;
pub use service::{AuthorService, BookService, CrudService};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_PROBLEM_JSON: &str = "application/problem+json";

pub const AUTHORS_BY_BOOK_ID_PATH: &str = "/api/v1/Authors/authors/books/{idBook}";

/// One request, described against a path template such as
/// `/api/v1/Books/{id}`.
#[derive(Debug, Clone)]
pub struct Call {
    method:      Method,
    template:    &'static str,
    path_params: Vec<(&'static str, String)>,
    query:       Vec<(String, String)>,
    body:        Option<Vec<u8>>,
    step:        String,
}

impl Call {
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            path_params: vec![],
            query: vec![],
            body: None,
            step: String::new(),
        }
    }

    pub fn get(template: &'static str) -> Self {
        Self::new(Method::GET, template)
    }

    pub fn post(template: &'static str) -> Self {
        Self::new(Method::POST, template)
    }

    pub fn put(template: &'static str) -> Self {
        Self::new(Method::PUT, template)
    }

    pub fn delete(template: &'static str) -> Self {
        Self::new(Method::DELETE, template)
    }

    pub fn path_param(mut self, name: &'static str, value: impl Display) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn query_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Display,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Human-readable label for the step span, e.g. "Get book by ID: 1".
    pub fn step(mut self, label: impl Into<String>) -> Self {
        self.step = label.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// The template with every `{name}` replaced by its path parameter.
    pub fn path(&self) -> String {
        self.path_params
            .iter()
            .fold(self.template.to_string(), |path, (name, value)| {
                path.replace(&format!("{{{name}}}"), value)
            })
    }
}

/// Shared configuration for every request. Cheap to clone.
#[derive(Clone)]
pub struct RequestSpec {
    base_url: String,
    http:     reqwest::Client,
    filters:  Vec<Arc<dyn Filter>>,
}

impl RequestSpec {
    /// The setup every test runs with: logging when `log_http` is set,
    /// and schema validation at the configured level.
    pub fn new(config: &Config) -> Result<Self> {
        let spec = Self::bare(config)?;
        let spec = if config.log_http {
            spec.with_filter(LoggingFilter)
        } else {
            spec
        };
        Ok(spec.with_filter(SchemaValidationFilter::books_and_authors(
            config.schema_validation,
        )))
    }

    /// Same base URL and timeouts, no filters.
    pub fn bare(config: &Config) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            filters: vec![],
        })
    }

    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn url_for(&self, call: &Call) -> String {
        format!("{}{}", self.base_url, call.path())
    }

    /// Sends `call` and reads the whole body. Every status comes back as
    /// `Ok`; only transport failures and failing filters are errors.
    pub async fn send(&self, call: Call) -> Result<ApiResponse> {
        let span = info_span!("step", label = %call.step);
        self.send_inner(call).instrument(span).await
    }

    async fn send_inner(&self, call: Call) -> Result<ApiResponse> {
        let url = self.url_for(&call);
        let record = RequestRecord {
            step:     &call.step,
            method:   &call.method,
            template: call.template,
            url:      &url,
            query:    &call.query,
            body:     call.body.as_deref(),
        };
        for filter in &self.filters {
            filter.on_request(&record);
        }

        let mut request = self
            .http
            .request(call.method.clone(), &url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(ACCEPT, CONTENT_TYPE_JSON);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.body(body.clone());
        }

        let transport = |source| Error::Transport {
            method: call.method.to_string(),
            url: url.clone(),
            source,
        };
        let started = Instant::now();
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport)?.to_vec();
        let response = ApiResponse::new(status, headers, body, started.elapsed());

        info!(
            status = response.status_code(),
            elapsed_ms = response.time().as_millis() as u64,
            "{} {}",
            call.method,
            call.path()
        );
        for filter in &self.filters {
            filter.on_response(&record, &response)?;
        }
        Ok(response)
    }
}

impl std::fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSpec")
            .field("base_url", &self.base_url)
            .field("filters", &self.filter_names())
            .finish()
    }
}
