//! readinglist - schema validation and transition rules for reading list
//! articles
//!
//! Raw client input goes through the [`schema`] validator into an
//! [`article::Article`] candidate; the [`rules`] engine then checks it against
//! the stored record and derives the final one. [`resource`] ties both
//! together per write method, and [`cli`] exposes them on the command line.

pub mod article;
pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resource;
pub mod rules;
pub mod schema;
