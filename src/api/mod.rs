//! HTTP plumbing shared by every endpoint module.

pub(crate) mod live;
pub(crate) mod matches;
pub(crate) mod referees;
pub(crate) mod tournaments;
pub(crate) mod venues;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{RefdeskError, Result};

/// Per-request context: HTTP client, API base URL, bearer token.
pub(crate) struct Api<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
    pub token: &'a str,
}

impl Api<'_> {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let response = self.exec(self.http.get(&url).query(query), &url).await?;
        decode(response, &url).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let response = self.exec(self.http.post(&url).json(body), &url).await?;
        decode(response, &url).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let response = self.exec(self.http.put(&url).json(body), &url).await?;
        decode(response, &url).await
    }

    /// POST whose success response carries no body worth decoding.
    pub(crate) async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.url(path);
        self.exec(self.http.post(&url).json(body), &url).await?;
        Ok(())
    }

    /// PUT whose success response carries no body worth decoding.
    pub(crate) async fn put_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.url(path);
        self.exec(self.http.put(&url).json(body), &url).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.exec(self.http.delete(&url), &url).await?;
        Ok(())
    }

    /// Send the request and map transport failures and error statuses.
    /// 401 gets its own variant so callers can branch on it.
    async fn exec(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response> {
        let response = builder
            .bearer_auth(self.token)
            .send()
            .await
            .map_err(|e| RefdeskError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RefdeskError::Unauthorized {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(RefdeskError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
    response.json().await.map_err(|e| RefdeskError::Decode {
        url: url.to_owned(),
        source: e,
    })
}
