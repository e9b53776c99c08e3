use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile row written by the external credential store. This service only
/// reads it (admin listing); registration and login live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub full_name: String,
    pub mobile: String,
    pub role: String,
    pub email: String,
}
