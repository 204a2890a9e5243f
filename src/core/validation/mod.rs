//! Validation system
//!
//! One shared schema layer validates both caller input (before any request is
//! sent) and server responses (before they are trusted). Values go through
//! coercion [`filters`], then field [`validators`]; [`schema`] ties them into
//! the order shapes and collects every issue with its path.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::Shape;
pub use validators::{CPF_PATTERN, is_valid_cpf};
