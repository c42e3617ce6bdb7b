use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::subscriber::NewSubscriber;
use crate::domain::FieldError;

#[derive(Deserialize)]
pub struct SubscribeBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subscribed: bool,
}

impl TryFrom<SubscribeBody> for NewSubscriber {
    type Error = Vec<FieldError>;

    fn try_from(value: SubscribeBody) -> Result<Self, Self::Error> {
        NewSubscriber::parse(value.name, value.email, value.subscribed)
    }
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub data: SubscribeData,
    pub message: String,
}

#[derive(Serialize)]
pub struct SubscribeData {
    pub id: Uuid,
}

impl SubscribeResponse {
    pub fn new(id: Uuid) -> Self {
        Self {
            success: true,
            data: SubscribeData { id },
            message: "Successfully subscribed to updates!".to_owned(),
        }
    }
}
