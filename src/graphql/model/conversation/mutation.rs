use async_graphql::{Context, Object, Result};

use crate::dynamodb::DynamoTable;
use crate::graphql::auth::require_user_id;
use crate::graphql::errors::check_id_kind;
use crate::graphql::model::text::{Text, TEXT_TYPE_NAME};
use crate::graphql::model::user::USER_TYPE_NAME;
use crate::graphql::types::ID;

use super::extensions::DynamoTableConversationExt;
use super::{Conversation, CONVERSATION_TYPE_NAME};

#[derive(Default)]
pub struct ConversationMutation;

#[Object]
impl ConversationMutation {
    /// Opens a conversation between the given participants and the caller.
    /// A non-empty `text` seeds the conversation with a first message
    /// authored by the caller, written together with the conversation.
    async fn create_conversation(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        participant_ids: Vec<ID>,
        text: Option<String>,
    ) -> Result<Conversation> {
        let user_id = require_user_id(ctx)?;
        for id in &participant_ids {
            check_id_kind(id, USER_TYPE_NAME)?;
        }

        // The caller is always part of the conversations they open. The given
        // list is taken as-is, duplicates included.
        let mut all_participant_ids = participant_ids;
        all_participant_ids.push(user_id.clone());

        let conversation = Conversation {
            id: ID::new(CONVERSATION_TYPE_NAME),
            stored_name: name,
            participant_ids: all_participant_ids,
        };
        let first_text = text.filter(|body| !body.is_empty()).map(|body| Text {
            id: ID::new(TEXT_TYPE_NAME),
            text: body,
            author_id: user_id,
            conversation_id: conversation.id.clone(),
        });

        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb
            .create_conversation(&conversation, first_text.as_ref())
            .await?;
        Ok(conversation)
    }
}
