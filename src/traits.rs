use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// A resource collection exposed by the API.
pub trait Resource: Serialize + DeserializeOwned + Debug + Clone + Send + Sync {
    /// Singular, lower case, as used in step labels ("book").
    const NAME: &'static str;
    /// Plural, lower case ("books").
    const NAME_PLURAL: &'static str;
    /// Collection endpoint, e.g. `/api/v1/Books`.
    const COLLECTION_PATH: &'static str;
    /// Single-item endpoint with an `{id}` placeholder.
    const ITEM_PATH: &'static str;

    fn id(&self) -> Option<i32>;

    /// Human-readable summary used in "Create new ..." step labels.
    fn describe(&self) -> String;

    /// Label and presence of every field the server requires.
    fn required_fields(&self) -> Vec<(&'static str, bool)>;
}
