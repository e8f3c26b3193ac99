use anyhow::Result;
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::SET_COOKIE;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::errors::TransportError;
use crate::models::{HttpMethod, Response};

use super::{ProbeRequest, Transport};

/// Stateful HTTP session against one base target. Cookies set by the target
/// persist across requests within a run; nothing else reads or writes the
/// jar. Redirect following is selected per request, so two reqwest clients
/// share the same jar (reqwest fixes the redirect policy per client).
pub struct TransportSession {
    following: Client,
    direct: Client,
    base_url: String,
}

impl TransportSession {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let following = Client::builder()
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::limited(10))
            .danger_accept_invalid_certs(false)
            .build()?;

        let direct = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(false)
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        Ok(Self {
            following,
            direct,
            base_url,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn query_string(params: &[(String, String)]) -> String {
        let pairs: Vec<String> = params
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    urlencoding::encode(k).to_string()
                } else {
                    format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                }
            })
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

#[async_trait]
impl Transport for TransportSession {
    async fn send(&self, request: &ProbeRequest) -> Result<Response, TransportError> {
        let client = if request.follow_redirects {
            &self.following
        } else {
            &self.direct
        };

        let url = self.url_for(&request.path);
        let builder = match request.method {
            HttpMethod::Get => {
                let query = Self::query_string(&request.form);
                client.get(format!("{}{}", url, query))
            }
            HttpMethod::Post => client.post(&url).form(&request.form),
        };

        debug!(method = %request.method, %url, "sending probe request");

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        debug!(status, body_len = body.len(), "probe response received");

        Ok(Response::new(status, headers, set_cookies, body))
    }
}
