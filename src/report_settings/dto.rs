use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReportSettingsRequest {
    pub enabled: Option<bool>,
    pub frequency: Option<String>,
    pub email: Option<String>,
}
