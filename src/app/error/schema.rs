#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}
