mod document;
pub use self::document::{Document, Link, Links, ResourceIdentifier};
