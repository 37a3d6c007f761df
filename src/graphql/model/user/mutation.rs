use async_graphql::{Context, Error, Object, Result};

use crate::auth::JwtService;
use crate::dynamodb::DynamoTable;
use crate::graphql::types::ID;

use super::extensions::DynamoTableUserExt;
use super::{AuthPayload, User, USER_TYPE_NAME};

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Registers a user and returns a token asserting their identity.
    /// Usernames are not checked for uniqueness.
    async fn signup(&self, ctx: &Context<'_>, username: String) -> Result<AuthPayload> {
        let user = User {
            id: ID::new(USER_TYPE_NAME),
            username,
        };
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb.create_user(&user).await?;

        let jwt = ctx.data_unchecked::<JwtService>();
        let token = jwt
            .create_token(&user.id)
            .map_err(|e| Error::new(e.to_string()))?;
        Ok(AuthPayload {
            token,
            user_id: user.id,
        })
    }
}
