use serde::{Deserialize, Serialize};

/// Monthly revenue point, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub revenue: f64,
}
