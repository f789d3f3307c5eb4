use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::traits::Resource;

/// `None` serializes as `null`, which is how the negative cases drop a
/// required field.
#[derive(Default, Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(
    default,
    pattern = "immutable",
    setter(into, prefix = "with"),
    build_fn(private, name = "try_build"),
    derive(Debug)
)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id:           Option<i32>,
    #[builder(setter(custom))]
    pub title:        Option<String>,
    #[builder(setter(custom))]
    pub description:  Option<String>,
    pub page_count:   Option<i32>,
    #[builder(setter(custom))]
    pub excerpt:      Option<String>,
    #[builder(setter(custom))]
    pub publish_date: Option<String>,
}

str_setters!(BookBuilder {
    with_title => title,
    with_description => description,
    with_excerpt => excerpt,
    with_publish_date => publish_date,
});

impl BookBuilder {
    /// Unset fields fall back to `None`, so this cannot fail.
    pub fn build(&self) -> Book {
        self.try_build().unwrap_or_default()
    }
}

impl Resource for Book {
    const NAME: &'static str = "book";
    const NAME_PLURAL: &'static str = "books";
    const COLLECTION_PATH: &'static str = "/api/v1/Books";
    const ITEM_PATH: &'static str = "/api/v1/Books/{id}";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn describe(&self) -> String {
        self.title.clone().unwrap_or_default()
    }

    fn required_fields(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("Book ID", self.id.is_some()),
            ("Book page count", self.page_count.is_some()),
            ("Book publish date", self.publish_date.is_some()),
        ]
    }
}
