use std::convert::identity;

use async_graphql::Result;
use aws_sdk_dynamodb::model::AttributeValue;
use tokio_stream::StreamExt;

use crate::dynamodb::{AttributesGetterExt, DynamoTable, RawAttributes};
use crate::graphql::model::text::extensions::{build_text, text_attributes};
use crate::graphql::model::text::{Text, TEXT_TYPE_NAME};
use crate::graphql::types::ID;
use crate::graphql::Key;

use super::Conversation;

/// Extension used to decorate the DynamoTable with specialized methods for
/// Conversation
#[async_trait::async_trait]
pub trait DynamoTableConversationExt {
    /// Writes the conversation and, when given, its first text in a single
    /// transactional call.
    async fn create_conversation(
        &self,
        conversation: &Conversation,
        first_text: Option<&Text>,
    ) -> Result<()>;
    async fn get_conversation(&self, id: &ID) -> Result<Option<Conversation>>;
    async fn get_conversation_texts(&self, id: &ID) -> Result<Vec<Text>>;
}

#[async_trait::async_trait]
impl DynamoTableConversationExt for DynamoTable {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
        first_text: Option<&Text>,
    ) -> Result<()> {
        let key = Key {
            partition: conversation.id.clone(),
            sort: conversation.id.clone(),
        };
        let mut items = vec![(key, conversation_attributes(conversation))];
        if let Some(text) = first_text {
            let text_key = Key {
                partition: text.conversation_id.clone(),
                sort: text.id.clone(),
            };
            items.push((text_key, text_attributes(text)));
        }
        self.transact_put_items(items).await?;
        Ok(())
    }

    async fn get_conversation(&self, id: &ID) -> Result<Option<Conversation>> {
        let key = Key {
            partition: id.clone(),
            sort: id.clone(),
        };
        let output = self.get_item(&key, identity).await?;
        Ok(if let Some(item) = output.item() {
            Some(build_conversation(id, item)?)
        } else {
            None
        })
    }

    async fn get_conversation_texts(&self, id: &ID) -> Result<Vec<Text>> {
        let mut texts: Vec<Text> = Vec::new();
        let mut paginator = self
            .query_partition_by_prefix(id, &ID::prefix(TEXT_TYPE_NAME))
            .into_paginator()
            .send();
        while let Some(output) = paginator.next().await {
            for item in output?.items().unwrap_or_default() {
                let text_id: ID = item.get_from_string(&self.config.sort_key)?;
                texts.push(build_text(id, &text_id, item)?);
            }
        }
        Ok(texts)
    }
}

fn conversation_attributes(conversation: &Conversation) -> RawAttributes {
    let mut attributes = RawAttributes::new();
    if let Some(name) = &conversation.stored_name {
        attributes.insert("name".into(), AttributeValue::S(name.clone()));
    }
    attributes.insert(
        "participants".into(),
        AttributeValue::L(
            conversation
                .participant_ids
                .iter()
                .map(|id| AttributeValue::S(String::from(id)))
                .collect(),
        ),
    );
    attributes
}

pub(crate) fn build_conversation(id: &ID, item: &RawAttributes) -> Result<Conversation> {
    let participant_ids = item
        .get_string_list("participants")?
        .into_iter()
        .map(|raw| raw.parse::<ID>().map_err(Into::into))
        .collect::<Result<Vec<ID>>>()?;
    Ok(Conversation {
        id: id.clone(),
        stored_name: item.get_optional_string("name")?.cloned(),
        participant_ids,
    })
}
