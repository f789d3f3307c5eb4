/// `&str` setters for the `Option<String>` fields of a derived builder, so
/// both `with_title("Dune")` and `with_title(None)` read naturally.
macro_rules! str_setters {
    ($builder:ident { $($setter:ident => $field:ident),* $(,)? }) => {
        impl $builder {
            $(
                pub fn $setter<'a>(&self, value: impl Into<Option<&'a str>>) -> Self {
                    let mut builder = self.clone();
                    builder.$field = Some(value.into().map(str::to_owned));
                    builder
                }
            )*
        }
    };
}

pub mod timestamp;

pub mod author;
pub mod book;
pub mod error_response;
