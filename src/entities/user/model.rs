//! User and API token models

use crate::prelude::*;

impl_data_entity_validated!(
    User,
    "user",
    "users",
    ["username", "email", "first_name", "last_name"],
    {
        username: String,
        email: String,
        #[serde(default)]
        first_name: String,
        #[serde(default)]
        last_name: String,
        /// Argon2 PHC string
        password_hash: String,
    },
    validate: {
        create: {
            username: [required string_length(3, 150)],
            email: [required email],
            password: [required string_length(8, 128)],
            first_name: [optional string_length(0, 150)],
            last_name: [optional string_length(0, 150)],
        },
    },
    filters: {
        create: {
            username: [trim],
            email: [trim lowercase],
            first_name: [trim],
            last_name: [trim],
        },
    }
);

impl_data_entity!(
    AuthToken,
    "auth_token",
    "auth-tokens",
    [],
    {
        /// 40 hex characters
        key: String,
        user: Uuid,
    }
);

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Public view of a user (never exposes the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at,
        }
    }
}
