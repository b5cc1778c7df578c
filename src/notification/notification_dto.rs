use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub kind: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub icon: Option<String>,
    pub target_route: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearNotificationsResponse {
    pub deleted: u64,
}
