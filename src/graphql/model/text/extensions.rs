use async_graphql::Result;
use aws_sdk_dynamodb::model::AttributeValue;

use crate::dynamodb::{AttributesGetterExt, DynamoTable, RawAttributes};
use crate::graphql::types::ID;
use crate::graphql::Key;

use super::Text;

/// Extension used to decorate the DynamoTable with specialized methods for Text
#[async_trait::async_trait]
pub trait DynamoTableTextExt {
    async fn create_text(&self, text: &Text) -> Result<()>;
}

#[async_trait::async_trait]
impl DynamoTableTextExt for DynamoTable {
    async fn create_text(&self, text: &Text) -> Result<()> {
        let key = Key {
            partition: text.conversation_id.clone(),
            sort: text.id.clone(),
        };
        self.put_item(&key, text_attributes(text)).await?;
        Ok(())
    }
}

pub(crate) fn text_attributes(text: &Text) -> RawAttributes {
    let mut attributes = RawAttributes::new();
    attributes.insert("text".into(), AttributeValue::S(text.text.clone()));
    attributes.insert(
        "author".into(),
        AttributeValue::S(String::from(&text.author_id)),
    );
    attributes
}

pub(crate) fn build_text(conversation_id: &ID, id: &ID, item: &RawAttributes) -> Result<Text> {
    Ok(Text {
        id: id.clone(),
        text: item.get_string("text")?.clone(),
        author_id: item.get_from_string("author")?,
        conversation_id: conversation_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::graphql::model::conversation::CONVERSATION_TYPE_NAME;
    use crate::graphql::model::user::USER_TYPE_NAME;
    use crate::graphql::model::text::TEXT_TYPE_NAME;

    use super::*;

    #[test]
    fn text_attributes_round_trip_through_build_text() {
        let text = Text {
            id: ID::new(TEXT_TYPE_NAME),
            text: "hello there".into(),
            author_id: ID::new(USER_TYPE_NAME),
            conversation_id: ID::new(CONVERSATION_TYPE_NAME),
        };
        let rebuilt =
            build_text(&text.conversation_id, &text.id, &text_attributes(&text)).unwrap();
        assert_eq!(rebuilt.text, text.text);
        assert_eq!(rebuilt.author_id, text.author_id);
        assert_eq!(rebuilt.conversation_id, text.conversation_id);
    }

    #[test]
    fn build_text_rejects_items_missing_the_body() {
        let mut item = RawAttributes::new();
        item.insert(
            "author".into(),
            AttributeValue::S(String::from(&ID::new(USER_TYPE_NAME))),
        );
        assert!(build_text(
            &ID::new(CONVERSATION_TYPE_NAME),
            &ID::new(TEXT_TYPE_NAME),
            &item
        )
        .is_err());
    }
}
