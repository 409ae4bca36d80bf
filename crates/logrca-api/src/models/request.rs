use serde::Deserialize;

#[derive(Deserialize)]
pub struct AnalyzeLogsQuery {
    pub service: String,
}
