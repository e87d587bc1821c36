//! HTTP client seam over the selected endpoint.
//!
//! The application's resource calls go through here. The base URL is read
//! from the endpoint store on every request, so a selector update or a
//! manual override takes effect immediately; an empty base means
//! same-origin relative paths.

use serde::Serialize;

use crate::store::EndpointStore;

/// Outbound API client bound to the endpoint store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    store: EndpointStore,
}

impl ApiClient {
    pub fn new(store: EndpointStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            store,
        }
    }

    /// Current base URL; empty means same-origin.
    pub fn base_url(&self) -> String {
        self.store.base_url()
    }

    /// Absolute URL for an API path against the current base.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client.get(self.url_for(path)).send().await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client.post(self.url_for(path)).json(body).send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EndpointRecord;

    #[test]
    fn test_url_tracks_store_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = EndpointStore::open(dir.path().join("endpoint.json"));
        let client = ApiClient::new(store.clone());

        // No record yet: relative path, same-origin.
        assert_eq!(client.url_for("/api/members/"), "/api/members/");

        store
            .set(EndpointRecord::verified("http://192.168.1.5:8000", 0))
            .unwrap();
        assert_eq!(
            client.url_for("/api/members/"),
            "http://192.168.1.5:8000/api/members/"
        );
    }
}
