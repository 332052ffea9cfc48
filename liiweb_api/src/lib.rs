//! Client for the JSON:API of a LIIWeb (AfricanLII Drupal) site.

mod builder;
mod client;
mod errors;
mod query;
pub mod types;
pub use self::builder::{ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use self::client::{Client, DEFAULT_FIELDS, JSON_API_CONTENT_TYPE};
pub use self::errors::Error;
pub use self::query::{FilterOperator, LegislationQuery, Query, QueryCommon};
