use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user, as resolved from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// `GET /auth/v1/user` response. Only the fields the app reads are modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// OAuth providers disagree on the display-name key.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        let UserMetadata { full_name, name } = user.user_metadata;
        Self {
            id: user.id,
            email: user.email,
            full_name: full_name.or(name),
        }
    }
}

/// Error bodies differ between the auth (`msg`) and storage (`message`)
/// services.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.msg).or(self.error_description)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveObjectsRequest<'a> {
    pub prefixes: &'a [String],
}
