pub mod author;
pub mod book;
pub mod faker;

pub use author::AuthorBuilder;
pub use book::BookBuilder;
