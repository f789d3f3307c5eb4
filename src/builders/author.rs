pub use crate::types::author::AuthorBuilder;
use crate::builders::faker;

impl AuthorBuilder {
    /// Random, non-null values for every field, drawn once.
    pub fn new() -> Self {
        Self::default()
            .with_id(faker::number_between(1, i32::MAX))
            .with_id_book(faker::number_between(1, 100))
            .with_first_name(faker::first_name().as_str())
            .with_last_name(faker::last_name().as_str())
    }
}
