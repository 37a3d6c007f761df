use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject};

use crate::dynamodb::DynamoTable;
use crate::graphql::auth::require_user_id;
use crate::graphql::errors::Errors;
use crate::graphql::model::user::extensions::DynamoTableUserExt;
use crate::graphql::model::{Text, User};
use crate::graphql::types::ID;

use self::extensions::DynamoTableConversationExt;

pub mod extensions;
pub mod mutation;

pub const CONVERSATION_TYPE_NAME: &str = "conversation";

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Conversation {
    pub id: ID,
    /// Name given at creation, only surfaced for group conversations.
    #[graphql(skip)]
    pub stored_name: Option<String>,
    #[graphql(skip)]
    pub participant_ids: Vec<ID>,
}

#[ComplexObject]
impl Conversation {
    /// What the caller should label this conversation: the stored name for
    /// groups, the counterpart's username for two-party conversations.
    async fn name(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        let viewer_id = require_user_id(ctx)?;
        let participants = fetch_participants(ctx, &self.participant_ids).await?;
        Ok(display_name(
            self.stored_name.as_deref(),
            &participants,
            &viewer_id,
        ))
    }

    async fn participants(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        fetch_participants(ctx, &self.participant_ids).await
    }

    /// Texts of this conversation, oldest first.
    async fn texts(&self, ctx: &Context<'_>) -> Result<Vec<Text>> {
        let dynamodb = ctx.data_unchecked::<DynamoTable>();
        dynamodb.get_conversation_texts(&self.id).await
    }
}

async fn fetch_participants(ctx: &Context<'_>, ids: &[ID]) -> Result<Vec<User>> {
    let dynamodb = ctx.data_unchecked::<DynamoTable>();
    let mut participants = Vec::with_capacity(ids.len());
    for id in ids {
        participants.push(
            dynamodb
                .get_user(id)
                .await?
                .ok_or_else(|| Errors::NotFound.extend())?,
        );
    }
    Ok(participants)
}

/// Display-name rule: a group conversation keeps its stored name, a
/// two-party conversation is labelled with the other participant's username,
/// anything smaller has no name.
fn display_name(
    stored_name: Option<&str>,
    participants: &[User],
    viewer_id: &ID,
) -> Option<String> {
    match participants {
        [first, second] => Some(if first.id == *viewer_id {
            second.username.clone()
        } else {
            first.username.clone()
        }),
        group if group.len() > 2 => stored_name.map(str::to_owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::graphql::model::user::USER_TYPE_NAME;

    use super::*;

    fn user(username: &str) -> User {
        User {
            id: ID::new(USER_TYPE_NAME),
            username: username.to_owned(),
        }
    }

    #[test]
    fn group_conversations_keep_their_stored_name() {
        let participants = [user("ada"), user("grace"), user("linus")];
        let viewer = participants[0].id.clone();
        assert_eq!(
            display_name(Some("kernel talk"), &participants, &viewer),
            Some("kernel talk".to_owned())
        );
    }

    #[test]
    fn two_party_conversations_are_named_after_the_counterpart() {
        let participants = [user("ada"), user("grace")];
        assert_eq!(
            display_name(None, &participants, &participants[0].id),
            Some("grace".to_owned())
        );
        assert_eq!(
            display_name(None, &participants, &participants[1].id),
            Some("ada".to_owned())
        );
    }

    #[test]
    fn underpopulated_conversations_have_no_name() {
        let solo = [user("ada")];
        let viewer = solo[0].id.clone();
        assert_eq!(display_name(Some("ignored"), &solo, &viewer), None);
        assert_eq!(display_name(Some("ignored"), &[], &viewer), None);
    }
}
