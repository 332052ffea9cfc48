//! HTTP client for the LIIWeb Drupal JSON:API.

use std::collections::HashSet;
use std::fmt;

use reqwest::{
    header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE},
    Method, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    builder::{self, ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT},
    query::{LegislationQuery, Query},
    types::{Document, ResourceIdentifier},
    Error,
};

/// Media type of JSON:API documents. Sent as `Accept` on every request and as
/// `Content-Type` on JSON bodies.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Plain JSON. Fetching an expression by its FRBR URI only answers to this.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Fields fetched (besides the node id) when the caller does not ask for more.
pub const DEFAULT_FIELDS: &[&str] = &["field_frbr_uri"];

const LEGISLATION_PATH: &str = "/jsonapi/node/legislation";

/// Client for a single LIIWeb site.
///
/// Holds the site URL and API user credentials; every request is sent with
/// HTTP basic auth. The client is immutable after construction and can be
/// shared between tasks; the underlying connection pool is reused by every call.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Client {
    /// Creates a client for the site at `base_url`, e.g. `https://lii.example.org`.
    ///
    /// Never returns an error: an invalid URL is only reported when a request
    /// is made.
    ///
    /// # Panics
    ///
    /// If the TLS backend cannot be initialised. Use [`Client::builder`] to
    /// get that failure as an [`Error`] instead.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let http = builder::http_client(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT).unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client, using reqwest defaults: {}", e);
            reqwest::Client::default()
        });
        Self::from_parts(http, base_url.into(), username.into(), password.into())
    }

    /// Starts a [`ClientBuilder`] for custom timeouts or transports.
    pub fn builder(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(base_url, username, password)
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: String,
        username: String,
        password: String,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&url).map_err(|e| {
            tracing::error!("Invalid URL constructed from {}: {}", url, e);
            Error::InvalidUrl(e)
        })
    }

    fn request(&self, method: Method, url: Url, accept: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, accept)
    }

    /// Sends the request and reads the whole body, whatever the status.
    async fn execute(&self, request: RequestBuilder) -> Result<(StatusCode, String), Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to reach LIIWeb: {}", e);
            Error::Transport(e)
        })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;
        Ok((status, body))
    }

    /// Like [`execute`](Self::execute), but any non-success status is an error.
    async fn send(&self, request: RequestBuilder) -> Result<String, Error> {
        let (status, body) = self.execute(request).await?;
        check_status(status, body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = self.send(request).await?;
        decode(&body)
    }

    async fn submit<T>(&self, method: Method, path: &str, info: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        let url = self.get_url(path)?;
        let request = self
            .request(method, url, JSON_API_CONTENT_TYPE)
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .json(info);
        let doc: Document<Value> = self.send_json(request).await?;
        Ok(doc.data)
    }

    /// Lists every legislation expression in a place, following pagination
    /// until the server stops returning a `next` link.
    ///
    /// `place_code` is a country code such as `za`, or a country and
    /// locality such as `za-cpt`. Only the node id and FRBR URI of each
    /// expression are fetched.
    pub async fn list_legislation(&self, place_code: &str) -> Result<Vec<Value>, Error> {
        let query = LegislationQuery::for_place(place_code).with_fields(DEFAULT_FIELDS);
        self.list_legislation_matching(&query).await
    }

    /// Lists every legislation node matching `query`, across all pages.
    pub async fn list_legislation_matching(
        &self,
        query: &LegislationQuery,
    ) -> Result<Vec<Value>, Error> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(query.add_to_url(&self.get_url(LEGISLATION_PATH)?));
        while let Some(url) = next.take() {
            seen.insert(url.clone());
            let request = self.request(Method::GET, url, JSON_API_CONTENT_TYPE);
            let doc: Document<Vec<Value>> = self.send_json(request).await?;
            results.extend(doc.data);
            // the next link already carries the query parameters
            if let Some(href) = doc.links.next_href() {
                let url = self.next_page_url(href)?;
                if seen.contains(&url) {
                    tracing::warn!("Next link points at a page already fetched: {}", url);
                    break;
                }
                next = Some(url);
            }
        }
        Ok(results)
    }

    /// Resolves a `next` link against the base URL. Drupal behind a TLS
    /// terminating proxy advertises `http` links; those are upgraded when the
    /// site itself is `https`.
    fn next_page_url(&self, href: &str) -> Result<Url, Error> {
        let base = self.get_url("/")?;
        let mut url = base.join(href)?;
        if base.scheme() == "https" && url.scheme() == "http" && url.set_scheme("https").is_err() {
            tracing::warn!("Could not upgrade next link to https: {}", href);
        }
        Ok(url)
    }

    /// Fetches the first legislation expression whose FRBR URI starts with
    /// `frbr_uri_prefix`, or `None` if there is none.
    ///
    /// Useful for looking up a work, since only expression FRBR URIs can be
    /// fetched directly. `fields` are fetched in addition to the node id; an
    /// empty slice fetches every field.
    pub async fn find_legislation(
        &self,
        frbr_uri_prefix: &str,
        fields: &[&str],
    ) -> Result<Option<Value>, Error> {
        let url = LegislationQuery::default()
            .with_frbr_uri_prefix(frbr_uri_prefix)
            .with_fields(fields)
            .add_to_url(&self.get_url(LEGISLATION_PATH)?);
        let request = self.request(Method::GET, url, JSON_API_CONTENT_TYPE);
        let doc: Document<Vec<Value>> = self.send_json(request).await?;
        Ok(doc.data.into_iter().next())
    }

    /// Fetches a single legislation expression by its expression FRBR URI,
    /// or `None` if the site has no such expression.
    ///
    /// `fields` are fetched in addition to the node id; an empty slice
    /// fetches every field.
    pub async fn get_legislation(
        &self,
        expr_uri: &str,
        fields: &[&str],
    ) -> Result<Option<Value>, Error> {
        let url = LegislationQuery::default()
            .with_fields(fields)
            .add_to_url(&self.get_url(expr_uri)?);
        let request = self.request(Method::GET, url, JSON_CONTENT_TYPE);
        let (status, body) = self.execute(request).await?;
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("No legislation at {}", expr_uri);
            return Ok(None);
        }
        let body = check_status(status, body)?;
        let doc: Document<Option<Value>> = decode(&body)?;
        Ok(doc.data.filter(|data| !is_empty(data)))
    }

    /// Creates a new legislation work and its first expression, returning
    /// the full description the site stored.
    ///
    /// `info` is the node in Drupal JSON:API format.
    pub async fn create_legislation_work<T>(&self, info: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        self.submit(Method::POST, LEGISLATION_PATH, info).await
    }

    /// Creates a new expression of an existing work at `expr_uri`.
    pub async fn create_legislation<T>(&self, expr_uri: &str, info: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        self.submit(Method::POST, expr_uri, info).await
    }

    /// Patches an existing expression, returning its updated description.
    pub async fn update_legislation<T>(&self, expr_uri: &str, info: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        self.submit(Method::PATCH, expr_uri, info).await
    }

    /// Deletes the expression at `expr_uri`. The response body is ignored.
    pub async fn delete_legislation(&self, expr_uri: &str) -> Result<(), Error> {
        let url = self.get_url(expr_uri)?;
        let request = self.request(Method::DELETE, url, JSON_API_CONTENT_TYPE);
        self.send(request).await?;
        Ok(())
    }

    /// Uploads a file into `field` of a `node` type (e.g. `legislation`,
    /// `field_files`) and returns the id of the new file entity.
    pub async fn upload_file(
        &self,
        node: &str,
        filename: &str,
        data: impl Into<reqwest::Body>,
        field: &str,
    ) -> Result<String, Error> {
        let url = self.get_url(&format!("/jsonapi/node/{}/{}", node, field))?;
        let request = self
            .request(Method::POST, url, JSON_API_CONTENT_TYPE)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename.replace('"', "")),
            )
            .body(data);
        let doc: Document<ResourceIdentifier> = self.send_json(request).await?;
        Ok(doc.data.id)
    }

    /// Lists the files attached to a legislation node. `field` is either
    /// `field_images` or `field_files`.
    pub async fn list_legislation_files(
        &self,
        node_id: &str,
        field: &str,
    ) -> Result<Vec<Value>, Error> {
        let url = self.get_url(&format!("{}/{}/{}", LEGISLATION_PATH, node_id, field))?;
        let request = self.request(Method::GET, url, JSON_API_CONTENT_TYPE);
        let doc: Document<Vec<Value>> = self.send_json(request).await?;
        Ok(doc.data)
    }
}

fn check_status(status: StatusCode, body: String) -> Result<String, Error> {
    if status.is_success() {
        return Ok(body);
    }
    let snippet = truncate_body(&body);
    tracing::error!("Error from LIIWeb with status {}: {}", status, snippet);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(Error::Unauthorized {
            status: status.as_u16(),
            body: snippet,
        })
    } else {
        Err(Error::HttpStatus {
            status: status.as_u16(),
            body: snippet,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::Decode {
            source: e,
            body: snippet,
        }
    })
}

fn is_empty(data: &Value) -> bool {
    match data {
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
