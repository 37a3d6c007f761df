use async_graphql::{MergedObject, Schema};

use crate::auth::JwtService;
use crate::dynamodb::{DynamoTable, ItemKey};

use self::model::conversation::mutation::ConversationMutation;
use self::model::text::mutation::TextMutation;
use self::model::user::mutation::UserMutation;
use self::model::user::query::UserQuery;
use self::subscription::SubscriptionRoot;
use self::types::ID;

pub mod auth;
pub mod errors;
pub mod model;
pub mod subscription;
pub mod types;

pub type Key = ItemKey<ID>;

#[derive(MergedObject, Default)]
pub struct Query(UserQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, ConversationMutation, TextMutation);

pub type GraphQLSchema = Schema<Query, Mutation, SubscriptionRoot>;

pub fn build_schema(dynamodb: DynamoTable, jwt: JwtService) -> GraphQLSchema {
    Schema::build(
        Query::default(),
        Mutation::default(),
        SubscriptionRoot::default(),
    )
    .data(dynamodb)
    .data(jwt)
    .finish()
}

#[cfg(test)]
mod tests {
    use async_graphql::Request;

    use crate::dynamodb::DynamoDBConfig;
    use crate::graphql::auth::Token;

    use super::*;

    async fn test_schema() -> GraphQLSchema {
        // Pin a region so the SDK config loads without probing the environment.
        std::env::set_var("AWS_REGION", "eu-west-1");
        let config = DynamoDBConfig {
            table: "chat-test".into(),
            partition_key: "pk".into(),
            sort_key: "sk".into(),
        };
        let dynamodb = DynamoTable::load(&config).await.unwrap();
        build_schema(dynamodb, JwtService::new("test-secret"))
    }

    #[tokio::test]
    async fn schema_exposes_the_chat_surface() {
        let sdl = test_schema().await.sdl();
        for field in [
            "users",
            "me",
            "signup",
            "createConversation",
            "sendTextMessage",
        ] {
            assert!(sdl.contains(field), "missing '{}' in SDL", field);
        }
        assert!(sdl.contains("type Subscription"));
    }

    #[tokio::test]
    async fn identity_requiring_operations_reject_missing_credentials() {
        let schema = test_schema().await;
        for operation in ["{ me { id username } }", "{ users { id } }"] {
            let response = schema.execute(operation).await;
            assert_eq!(response.errors.len(), 1, "operation: {}", operation);
            assert_eq!(response.errors[0].message, "Not authorized");
        }
    }

    #[tokio::test]
    async fn invalid_tokens_fail_verification() {
        let schema = test_schema().await;
        let request = Request::new("{ me { id } }").data(Token("Bearer garbage".into()));
        let response = schema.execute(request).await;
        assert_eq!(response.errors.len(), 1);
        assert_ne!(response.errors[0].message, "Not authorized");
    }
}
