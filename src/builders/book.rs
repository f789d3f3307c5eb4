pub use crate::types::book::BookBuilder;
use crate::{builders::faker, types::timestamp::Timestamp};

impl BookBuilder {
    /// Every field starts out random and non-null; override only what the
    /// scenario cares about. Nothing is validated, so `with_id(None)` happily
    /// builds a book the server will reject.
    ///
    /// Values are drawn once here, so repeated `build()` calls agree.
    pub fn new() -> Self {
        Self::default()
            .with_id(faker::number_between(i32::MIN, i32::MAX))
            .with_title(faker::book_title().as_str())
            .with_description(faker::paragraph().as_str())
            .with_page_count(faker::number_in(50, 1000))
            .with_excerpt(faker::sentence().as_str())
            .with_publish_date(Timestamp::now().to_iso_string().as_str())
    }
}
