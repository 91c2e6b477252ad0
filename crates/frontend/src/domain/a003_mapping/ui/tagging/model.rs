use crate::shared::api_utils::{api_url, read_json};
use contracts::domain::a003_mapping::{MappingList, PredictionTag};
use gloo_net::http::Request;

pub async fn fetch_prediction_tags() -> Result<Vec<PredictionTag>, String> {
    let response = Request::get(&api_url("/api/prediction-tags"))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

pub async fn fetch_mappings(framework_id: &str) -> Result<MappingList, String> {
    let response = Request::get(&api_url(&format!("/api/frameworks/{}/mappings", framework_id)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// Replace the framework's mappings; the server answers with the stored list
pub async fn save_mappings(framework_id: &str, mappings: &MappingList) -> Result<MappingList, String> {
    let response = Request::put(&api_url(&format!("/api/frameworks/{}/mappings", framework_id)))
        .json(mappings)
        .map_err(|e| format!("Failed to serialize mappings: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}
