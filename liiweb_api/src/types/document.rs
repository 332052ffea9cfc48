//! The JSON:API document envelope served by Drupal.
//!
//! Only the parts the client needs to walk pagination and unwrap responses
//! are typed. Resource objects themselves are left to the caller.

use serde::{Deserialize, Serialize};

/// Top-level JSON:API document: `{"data": ..., "links": {...}}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub links: Links,
}

/// Document-level links. Drupal always sends `self`; `next` is present only
/// when another page of results exists.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Links {
    #[serde(rename = "self")]
    pub this: Option<Link>,
    pub next: Option<Link>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Link {
    pub href: String,
}

impl Links {
    /// URL of the next page, if any.
    pub fn next_href(&self) -> Option<&str> {
        self.next.as_ref().map(|l| l.href.as_str())
    }
}

/// `{"type": ..., "id": ...}` pair identifying a resource, as returned when a
/// file entity is created.
#[derive(Serialize, Deserialize, Debug)]
pub struct ResourceIdentifier {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
}
