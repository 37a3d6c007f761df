use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject};

use crate::dynamodb::DynamoTable;
use crate::graphql::errors::Errors;
use crate::graphql::model::conversation::extensions::DynamoTableConversationExt;
use crate::graphql::model::user::extensions::DynamoTableUserExt;
use crate::graphql::model::{Conversation, User};
use crate::graphql::types::ID;

pub mod extensions;
pub mod mutation;

pub const TEXT_TYPE_NAME: &str = "text";

/// A single message. Stored under its conversation's partition so a
/// conversation's texts read back in the order they were written.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Text {
    pub id: ID,
    pub text: String,
    #[graphql(skip)]
    pub author_id: ID,
    #[graphql(skip)]
    pub conversation_id: ID,
}

#[ComplexObject]
impl Text {
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb
            .get_user(&self.author_id)
            .await?
            .ok_or_else(|| Errors::NotFound.extend())
    }

    async fn conversation(&self, ctx: &Context<'_>) -> Result<Conversation> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb
            .get_conversation(&self.conversation_id)
            .await?
            .ok_or_else(|| Errors::NotFound.extend())
    }
}
