use std::convert::identity;

use async_graphql::Result;
use aws_sdk_dynamodb::model::AttributeValue;
use tokio_stream::StreamExt;

use crate::dynamodb::{AttributesGetterExt, DynamoTable, RawAttributes};
use crate::graphql::types::ID;
use crate::graphql::Key;

use super::{User, USER_TYPE_NAME};

/// Extension used to decorate the DynamoTable with specialized methods for User
#[async_trait::async_trait]
pub trait DynamoTableUserExt {
    async fn scan_users(&self, exclude: &ID) -> Result<Vec<User>>;
    async fn get_user(&self, id: &ID) -> Result<Option<User>>;
    async fn create_user(&self, user: &User) -> Result<()>;
}

#[async_trait::async_trait]
impl DynamoTableUserExt for DynamoTable {
    async fn scan_users(&self, exclude: &ID) -> Result<Vec<User>> {
        let mut users: Vec<User> = Vec::new();
        let mut paginator = self
            .scan()
            .filter_expression("begins_with(#sk, :prefix) AND #sk <> :viewer")
            .expression_attribute_names("#sk", &self.config.sort_key)
            .expression_attribute_values(":prefix", AttributeValue::S(ID::prefix(USER_TYPE_NAME)))
            .expression_attribute_values(":viewer", AttributeValue::S(String::from(exclude)))
            .into_paginator()
            .send();

        while let Some(output) = paginator.next().await {
            for item in output?.items().unwrap_or_default() {
                let id: ID = item.get_from_string(&self.config.sort_key)?;
                users.push(build_user(&id, item)?);
            }
        }
        Ok(users)
    }

    async fn get_user(&self, id: &ID) -> Result<Option<User>> {
        let key = Key {
            partition: id.clone(),
            sort: id.clone(),
        };
        let output = self.get_item(&key, identity).await?;
        Ok(if let Some(item) = output.item() {
            Some(build_user(id, item)?)
        } else {
            None
        })
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let key = Key {
            partition: user.id.clone(),
            sort: user.id.clone(),
        };
        let mut attributes = RawAttributes::new();
        attributes.insert("username".into(), AttributeValue::S(user.username.clone()));
        self.put_item(&key, attributes).await?;
        Ok(())
    }
}

pub(crate) fn build_user(id: &ID, item: &RawAttributes) -> Result<User> {
    Ok(User {
        id: id.clone(),
        username: item.get_string("username")?.clone(),
    })
}
