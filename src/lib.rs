//! Black-box test support for the Books and Authors REST API.
//!
//! The crate is split the same way a test flows through it:
//! [`builders`] produce randomized models, [`client`] sends them through a
//! shared [`client::RequestSpec`], and [`assertions`] verifies what came back.

pub mod assertions;
pub mod builders;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
