#![allow(dead_code)]

pub mod fake_service;

use shelfprobe::{
    client::{AuthorService, BookService, RequestSpec},
    config::Config,
    logging,
};
use tracing::info;

/// Set to `1` or `true` to run against `Config::base_url` instead of the
/// in-process fake.
pub const LIVE_ENV: &str = "SHELFPROBE_LIVE";

/// Per-test bootstrap: configuration, logging and one service per resource.
pub struct Suite {
    pub config:  Config,
    pub books:   BookService,
    pub authors: AuthorService,
}

impl Suite {
    pub async fn start(test_name: &str) -> anyhow::Result<Self> {
        let mut config = Config::read_config()?;
        logging::init(&config.log_filter);
        info!("Starting test: {test_name}");

        if live() {
            info!("Running against {}", config.base_url);
        } else {
            config.base_url = fake_service::start().await?;
        }

        let spec = RequestSpec::new(&config)?;
        Ok(Self {
            books: BookService::new(spec.clone()),
            authors: AuthorService::new(spec),
            config,
        })
    }
}

pub fn live() -> bool {
    dotenvy::var(LIVE_ENV).map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"))
}
