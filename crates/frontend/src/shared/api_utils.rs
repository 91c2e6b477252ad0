//! API location helpers
//!
//! The API is served from the page's host on port 3000.

use gloo_net::http::Response;

pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full API URL for `path` (starting with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

async fn check_status(response: &Response) -> Result<(), String> {
    if response.ok() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("HTTP {}: {}", response.status(), body))
}

/// Decode a JSON response, turning HTTP errors into messages
pub async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    check_status(&response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Body of a successful response as text
pub async fn read_text(response: Response) -> Result<String, String> {
    check_status(&response).await?;
    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}
