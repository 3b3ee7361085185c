use super::entities::Material;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialResponse {
    pub material: Material,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<Material>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct StudyBuddyResponse {
    pub answer: String,
    pub confidence: Option<String>,
    pub sources_used: Option<i64>,
    pub material_id: i64,
}
