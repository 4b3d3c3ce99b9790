//! HTTP client helpers shared by the commands that talk to a running server

use anyhow::{anyhow, Context, Result};
use clap::Args;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Where the expense API listens unless told otherwise
pub const DEFAULT_API: &str = "http://127.0.0.1:8000";

#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Expense API base URL
    #[arg(long, env = "EXPENSECTL_API", default_value = DEFAULT_API)]
    pub api: String,
}

/// Error body produced by the server's `ApiError`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn new(args: &ApiArgs) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base: args.api.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;
        handle_response(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&error_text) {
            Err(anyhow!("{} ({}): {}", status, error_resp.error, error_resp.message))
        } else {
            Err(anyhow!("{}: {}", status, error_text))
        }
    }
}
