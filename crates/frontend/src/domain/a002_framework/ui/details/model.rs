use crate::shared::api_utils::{api_url, read_json, read_text};
use contracts::domain::a001_widget::{EntryAttributes, GeoArea};
use contracts::domain::a002_framework::Framework;
use contracts::shared::paging::{OptionsPage, OptionsQuery};
use gloo_net::http::Request;

pub async fn fetch_framework(id: &str) -> Result<Framework, String> {
    let response = Request::get(&api_url(&format!("/api/frameworks/{}", id)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    let body = read_text(response).await?;
    Framework::from_json(&body).map_err(|e| format!("{:#}", e))
}

/// Persist the framework; the server answers with the stored version
pub async fn save_framework(framework: &Framework) -> Result<Framework, String> {
    let request = match &framework.id {
        Some(id) => Request::put(&api_url(&format!("/api/frameworks/{}", id))),
        None => Request::post(&api_url("/api/frameworks")),
    };
    let response = request
        .json(framework)
        .map_err(|e| format!("Failed to serialize framework: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// Attributes of the framework's preview entry
pub async fn fetch_entry(framework_id: &str) -> Result<EntryAttributes, String> {
    let response = Request::get(&api_url(&format!("/api/frameworks/{}/entry", framework_id)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

pub async fn save_entry(framework_id: &str, entry: &EntryAttributes) -> Result<EntryAttributes, String> {
    let response = Request::put(&api_url(&format!("/api/frameworks/{}/entry", framework_id)))
        .json(entry)
        .map_err(|e| format!("Failed to serialize entry: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

pub async fn fetch_geo_areas(query: &OptionsQuery) -> Result<OptionsPage<GeoArea>, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    let response = Request::get(&api_url(&format!("/api/geo-areas?{}", qs)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}
