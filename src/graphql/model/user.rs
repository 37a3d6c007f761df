use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject};

use crate::dynamodb::DynamoTable;
use crate::graphql::errors::Errors;
use crate::graphql::types::ID;

use self::extensions::DynamoTableUserExt;

pub mod extensions;
pub mod mutation;
pub mod query;

pub const USER_TYPE_NAME: &str = "user";

#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub username: String,
}

/// Result of a successful signup. The signed token embeds the new user's id.
#[derive(Debug, SimpleObject)]
#[graphql(complex)]
pub struct AuthPayload {
    pub token: String,
    #[graphql(skip)]
    pub user_id: ID,
}

#[ComplexObject]
impl AuthPayload {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb
            .get_user(&self.user_id)
            .await?
            .ok_or_else(|| Errors::NotFound.extend())
    }
}
