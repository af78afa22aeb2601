//! HTTP implementation of the administration service.
//!
//! Talks to a Toxiproxy-compatible admin API:
//! - `GET/POST /proxies`, `GET/POST/DELETE /proxies/{name}`
//! - `POST /proxies/{name}/toxics`, `POST/DELETE /proxies/{name}/toxics/{toxic}`
//!
//! Non-2xx responses carry a JSON `{"error": ...}` body, which is surfaced
//! as the error message.

mod wire;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use toxictl_config::AppConfig;
use toxictl_core::error::{Error, Result};
use toxictl_core::{AdminService, Fields, NewToxic, Proxies, Proxy, Toxic};
use tracing::{debug, warn};

use wire::{
    AddToxicRequest, CreateProxyRequest, ErrorJson, ProxyJson, SaveProxyRequest, ToxicJson,
    UpdateToxicRequest,
};

/// What a 404 refers to, so it can be reported as the right kind of miss.
enum Subject<'a> {
    Collection,
    Proxy(&'a str),
    Toxic { proxy: &'a str, toxic: &'a str },
}

/// A client for the administration API at a fixed base address.
pub struct HttpAdminClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpAdminClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .map_err(|e| Error::Connection(format!("invalid admin address '{base_url}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Connection(format!(
                "invalid admin address '{base_url}': not a base URL"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.host.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build a request to the base address plus `segments`, each percent-encoded
    /// as a single path segment.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        debug!(%method, %url, "Sending admin request");
        self.client.request(method, url)
    }

    /// Send a request, turning transport failures and error statuses into `Error`.
    async fn send(&self, request: RequestBuilder, subject: Subject<'_>) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorJson>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        warn!(status = status.as_u16(), %message, "Admin API returned error");

        Err(match status {
            StatusCode::NOT_FOUND => match subject {
                Subject::Toxic { proxy, toxic } if message.contains("toxic") => {
                    Error::ToxicNotFound {
                        proxy: proxy.to_string(),
                        toxic: toxic.to_string(),
                    }
                }
                Subject::Toxic { proxy, .. } | Subject::Proxy(proxy) => {
                    Error::NotFound(proxy.to_string())
                }
                Subject::Collection => Error::Service {
                    status: status.as_u16(),
                    message,
                },
            },
            StatusCode::CONFLICT => Error::Conflict(message),
            other => Error::Service {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Protocol(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl AdminService for HttpAdminClient {
    async fn list_proxies(&self) -> Result<Proxies> {
        let response = self
            .send(self.request(Method::GET, &["proxies"]), Subject::Collection)
            .await?;
        let proxies: HashMap<String, ProxyJson> = Self::decode(response).await?;

        proxies
            .into_values()
            .map(|json| Proxy::try_from(json).map(|proxy| (proxy.name.clone(), proxy)))
            .collect()
    }

    async fn get_proxy(&self, name: &str) -> Result<Proxy> {
        let response = self
            .send(
                self.request(Method::GET, &["proxies", name]),
                Subject::Proxy(name),
            )
            .await?;
        Proxy::try_from(Self::decode::<ProxyJson>(response).await?)
    }

    async fn create_proxy(&self, name: &str, listen: &str, upstream: &str) -> Result<Proxy> {
        let body = CreateProxyRequest {
            name,
            listen,
            upstream,
            enabled: true,
        };
        let response = self
            .send(
                self.request(Method::POST, &["proxies"]).json(&body),
                Subject::Proxy(name),
            )
            .await?;
        Proxy::try_from(Self::decode::<ProxyJson>(response).await?)
    }

    async fn delete_proxy(&self, name: &str) -> Result<()> {
        self.send(
            self.request(Method::DELETE, &["proxies", name]),
            Subject::Proxy(name),
        )
        .await?;
        Ok(())
    }

    async fn save_proxy(&self, proxy: &Proxy) -> Result<()> {
        let body = SaveProxyRequest {
            listen: &proxy.listen,
            upstream: &proxy.upstream,
            enabled: proxy.enabled,
        };
        self.send(
            self.request(Method::POST, &["proxies", &proxy.name])
                .json(&body),
            Subject::Proxy(&proxy.name),
        )
        .await?;
        Ok(())
    }

    async fn add_toxic(&self, proxy: &str, toxic: &NewToxic) -> Result<Toxic> {
        let body = AddToxicRequest::from(toxic);
        let response = self
            .send(
                self.request(Method::POST, &["proxies", proxy, "toxics"])
                    .json(&body),
                Subject::Proxy(proxy),
            )
            .await?;
        Toxic::try_from(Self::decode::<ToxicJson>(response).await?)
    }

    async fn update_toxic(&self, proxy: &str, toxic: &str, fields: &Fields) -> Result<Toxic> {
        let body = UpdateToxicRequest { attributes: fields };
        let response = self
            .send(
                self.request(Method::POST, &["proxies", proxy, "toxics", toxic])
                    .json(&body),
                Subject::Toxic { proxy, toxic },
            )
            .await?;
        Toxic::try_from(Self::decode::<ToxicJson>(response).await?)
    }

    async fn remove_toxic(&self, proxy: &str, toxic: &str) -> Result<()> {
        self.send(
            self.request(Method::DELETE, &["proxies", proxy, "toxics", toxic]),
            Subject::Toxic { proxy, toxic },
        )
        .await?;
        Ok(())
    }
}
