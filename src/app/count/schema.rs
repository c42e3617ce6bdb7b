use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub success: bool,
    pub data: CountData,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountData {
    pub count: i64,
}

impl CountResponse {
    pub fn fresh(count: i64) -> Self {
        Self {
            success: true,
            data: CountData { count },
            message: "Subscriber count retrieved successfully".to_owned(),
        }
    }

    pub fn cached(count: i64) -> Self {
        Self {
            success: true,
            data: CountData { count },
            message: "Cached subscriber count".to_owned(),
        }
    }
}
