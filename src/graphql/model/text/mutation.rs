use async_graphql::{Context, Object, Result};

use crate::dynamodb::DynamoTable;
use crate::graphql::auth::require_user_id;
use crate::graphql::errors::check_id_kind;
use crate::graphql::model::conversation::CONVERSATION_TYPE_NAME;
use crate::graphql::types::ID;

use super::extensions::DynamoTableTextExt;
use super::{Text, TEXT_TYPE_NAME};

#[derive(Default)]
pub struct TextMutation;

#[Object]
impl TextMutation {
    /// Posts a text into a conversation. Requires identity, but membership
    /// of the conversation is not checked.
    async fn send_text_message(
        &self,
        ctx: &Context<'_>,
        conversation_id: ID,
        text: String,
    ) -> Result<Text> {
        let user_id = require_user_id(ctx)?;
        check_id_kind(&conversation_id, CONVERSATION_TYPE_NAME)?;

        let message = Text {
            id: ID::new(TEXT_TYPE_NAME),
            text,
            author_id: user_id,
            conversation_id,
        };
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb.create_text(&message).await?;
        Ok(message)
    }
}
