use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document (collection `users`)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// Form body for POST /api/users
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserForm {
    #[serde(default)]
    pub username: String,
}

/// `{username, _id}` returned after creating a user and in the user list
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id.to_hex(),
        }
    }
}
