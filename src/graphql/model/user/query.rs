use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::dynamodb::DynamoTable;
use crate::graphql::auth::require_user_id;
use crate::graphql::errors::Errors;

use super::extensions::DynamoTableUserExt;
use super::User;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Every registered user except the caller.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let user_id = require_user_id(ctx)?;
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb.scan_users(&user_id).await
    }

    /// The caller's own user record.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let user_id = require_user_id(ctx)?;
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb
            .get_user(&user_id)
            .await?
            .ok_or_else(|| Errors::NotFound.extend())
    }
}
