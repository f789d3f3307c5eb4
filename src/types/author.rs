use std::fmt::Display;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::traits::Resource;

#[derive(Default, Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(
    default,
    pattern = "immutable",
    setter(into, prefix = "with"),
    build_fn(private, name = "try_build"),
    derive(Debug)
)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id:         Option<i32>,
    pub id_book:    Option<i32>,
    #[builder(setter(custom))]
    pub first_name: Option<String>,
    #[builder(setter(custom))]
    pub last_name:  Option<String>,
}

str_setters!(AuthorBuilder {
    with_first_name => first_name,
    with_last_name => last_name,
});

impl AuthorBuilder {
    pub fn build(&self) -> Author {
        self.try_build().unwrap_or_default()
    }
}

impl Resource for Author {
    const NAME: &'static str = "author";
    const NAME_PLURAL: &'static str = "authors";
    const COLLECTION_PATH: &'static str = "/api/v1/Authors";
    const ITEM_PATH: &'static str = "/api/v1/Authors/{id}";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn required_fields(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("Author ID", self.id.is_some()),
            ("Author book ID", self.id_book.is_some()),
        ]
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.first_name, &self.last_name) {
            (None, None) => write!(f, "(name unknown)"),
            (None, Some(last_name)) => write!(f, "{last_name}"),
            (Some(first_name), None) => write!(f, "{first_name}"),
            (Some(first_name), Some(last_name)) => write!(f, "{first_name} {last_name}"),
        }
    }
}
