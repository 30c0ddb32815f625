use serde::{Deserialize, Serialize};

use carrent_core::{Entity, UserId};

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
}

/// Transport shape for a user. Any string is accepted as the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
}

impl Entity for UserDto {
    type Id = UserId;

    const KIND: &'static str = "user";
    const COLLECTION: &'static str = "/users";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            user_name: dto.user_name,
            email: dto.email,
        }
    }
}
