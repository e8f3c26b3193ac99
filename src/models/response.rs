use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        write!(f, "{}", s)
    }
}

/// One HTTP response, read-only after construction. Header lookup is
/// case-insensitive; raw Set-Cookie lines are kept separately because the
/// header map collapses repeated names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    headers: HashMap<String, String>,
    set_cookies: Vec<String>,
    pub body: String,
}

impl Response {
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        set_cookies: Vec<String>,
        body: String,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            set_cookies,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }

    pub fn set_cookies(&self) -> &[String] {
        &self.set_cookies
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) || self.header("location").is_some()
    }
}
