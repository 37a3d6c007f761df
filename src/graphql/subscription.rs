use async_graphql::{Context, Result, Subscription};
use tokio_stream::Stream;

use crate::dynamodb::{ChangeRecord, DynamoTable};
use crate::graphql::model::text::extensions::build_text;
use crate::graphql::model::text::{Text, TEXT_TYPE_NAME};
use crate::graphql::model::user::extensions::build_user;
use crate::graphql::model::user::{User, USER_TYPE_NAME};
use crate::graphql::types::ID;

/// Live change events, taken from the gateway's change feed without any
/// per-caller scoping. Streams run until the client connection closes.
#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Every user as it is created.
    async fn user(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = User>> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        let mut changes = dynamodb.subscribe();
        Ok(async_stream::stream! {
            while let Ok(record) = changes.recv().await {
                if let Some(user) = user_from_record(&record) {
                    yield user;
                }
            }
        })
    }

    /// Every text as it is created, across all conversations.
    async fn text(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Text>> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        let mut changes = dynamodb.subscribe();
        Ok(async_stream::stream! {
            while let Ok(record) = changes.recv().await {
                if let Some(text) = text_from_record(&record) {
                    yield text;
                }
            }
        })
    }
}

fn user_from_record(record: &ChangeRecord) -> Option<User> {
    let id = record.sort.parse::<ID>().ok()?;
    if !id.has_type_name(USER_TYPE_NAME) {
        return None;
    }
    build_user(&id, &record.attributes).ok()
}

fn text_from_record(record: &ChangeRecord) -> Option<Text> {
    let conversation_id = record.partition.parse::<ID>().ok()?;
    let id = record.sort.parse::<ID>().ok()?;
    if !id.has_type_name(TEXT_TYPE_NAME) {
        return None;
    }
    build_text(&conversation_id, &id, &record.attributes).ok()
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::model::AttributeValue;

    use crate::dynamodb::RawAttributes;
    use crate::graphql::model::conversation::CONVERSATION_TYPE_NAME;

    use super::*;

    fn record(partition: &ID, sort: &ID, attributes: RawAttributes) -> ChangeRecord {
        ChangeRecord {
            partition: String::from(partition),
            sort: String::from(sort),
            attributes,
        }
    }

    #[test]
    fn user_events_only_surface_user_items() {
        let user_id = ID::new(USER_TYPE_NAME);
        let mut attributes = RawAttributes::new();
        attributes.insert("username".into(), AttributeValue::S("ada".into()));
        let user_record = record(&user_id, &user_id, attributes);

        let user = user_from_record(&user_record).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "ada");
        assert!(text_from_record(&user_record).is_none());
    }

    #[test]
    fn text_events_carry_their_conversation_and_author() {
        let conversation_id = ID::new(CONVERSATION_TYPE_NAME);
        let text_id = ID::new(TEXT_TYPE_NAME);
        let author_id = ID::new(USER_TYPE_NAME);
        let mut attributes = RawAttributes::new();
        attributes.insert("text".into(), AttributeValue::S("hello".into()));
        attributes.insert("author".into(), AttributeValue::S(String::from(&author_id)));
        let text_record = record(&conversation_id, &text_id, attributes);

        let text = text_from_record(&text_record).unwrap();
        assert_eq!(text.id, text_id);
        assert_eq!(text.conversation_id, conversation_id);
        assert_eq!(text.author_id, author_id);
        assert!(user_from_record(&text_record).is_none());
    }

    #[test]
    fn malformed_records_are_skipped() {
        let empty = ChangeRecord {
            partition: "not-an-id".into(),
            sort: "not-an-id".into(),
            attributes: RawAttributes::new(),
        };
        assert!(user_from_record(&empty).is_none());
        assert!(text_from_record(&empty).is_none());
    }
}
