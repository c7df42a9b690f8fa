use std::time::Duration;

use url::Url;

use crate::error::BrowseError;
use crate::model::NodePtr;
use crate::wire::{Envelope, StatusReport};

/// Blocking HTTP client for the graph server (one per app).
///
/// Every call maps transport and non-2xx failures to
/// `BrowseError::Network` and body decode failures to
/// `BrowseError::Malformed`; callers decide how far to degrade.
pub struct SearchClient {
    base: Url,
    client: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Result<SearchClient, BrowseError> {
        let base = Url::parse(base_url)
            .map_err(|e| BrowseError::Network(format!("invalid server URL: {}", e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("orbit-browser/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| BrowseError::Network(format!("client setup failed: {}", e)))?;

        Ok(SearchClient { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BrowseError> {
        self.base
            .join(path)
            .map_err(|e| BrowseError::Network(format!("bad endpoint {}: {}", path, e)))
    }

    fn read_envelope(&self, response: reqwest::blocking::Response) -> Result<Envelope, BrowseError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Network(format!(
                "server replied {}",
                status.as_u16()
            )));
        }
        let body = response
            .text()
            .map_err(|e| BrowseError::Network(format!("failed to read body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| BrowseError::Malformed(e.to_string()))
    }

    /// Landing query: the server picks the default view.
    pub fn initial(&self) -> Result<Envelope, BrowseError> {
        let url = self.endpoint("searchN4L")?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        self.read_envelope(response)
    }

    /// Run a query built by a document link, passed in the query string.
    pub fn search_link(&self, query: &str) -> Result<Envelope, BrowseError> {
        let url = self.endpoint("searchN4L")?;
        let response = self
            .client
            .get(url)
            .query(&[("search", query)])
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        self.read_envelope(response)
    }

    /// Run a user-typed query from the search bar.
    pub fn search(&self, name: &str) -> Result<Envelope, BrowseError> {
        let url = self.endpoint("searchN4L")?;
        let response = self
            .client
            .post(url)
            .form(&[("name", name)])
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        self.read_envelope(response)
    }

    /// Navigate to a node by its identity pair.
    pub fn open_node(&self, nptr: NodePtr) -> Result<Envelope, BrowseError> {
        let url = self.endpoint("searchN4L")?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("nclass", nptr.class.to_string()),
                ("ncptr", nptr.cptr.to_string()),
            ])
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        self.read_envelope(response)
    }

    /// Progress side channel: record that the user marked a node as seen.
    /// The reply body is ignored; only transport failures surface.
    pub fn mark_seen(&self, nptr: NodePtr, chapcontext: &str) -> Result<(), BrowseError> {
        let url = self.endpoint("searchN4L")?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("name", "\\lastnptr".to_string()),
                ("nclass", nptr.class.to_string()),
                ("ncptr", nptr.cptr.to_string()),
                ("chapcontext", chapcontext.to_string()),
            ])
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Network(format!(
                "server replied {}",
                status.as_u16()
            )));
        }
        Ok(())
    }

    /// One-shot health probe against `/status`.
    pub fn status(&self) -> Result<StatusReport, BrowseError> {
        let url = self.endpoint("status")?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BrowseError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Network(format!(
                "server replied {}",
                status.as_u16()
            )));
        }
        let body = response
            .text()
            .map_err(|e| BrowseError::Network(format!("failed to read body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| BrowseError::Malformed(e.to_string()))
    }
}
