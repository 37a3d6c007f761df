use aws_sdk_dynamodb::client::fluent_builders::{GetItem, Query, Scan};
use aws_sdk_dynamodb::model::{AttributeValue, Put, TransactWriteItem};
use aws_sdk_dynamodb::output::{GetItemOutput, PutItemOutput, TransactWriteItemsOutput};
use aws_sdk_dynamodb::Client;
use tokio::sync::broadcast;
use tracing::{error, info};

pub use self::config::DynamoDBConfig;
pub use self::errors::{DynamoDbErrors, Result};
pub use self::item::{AttributesGetterExt, ItemKey, RawAttributes};

pub mod config;
pub mod errors;
pub mod item;

/// Full image of an item written to the table, fanned out to live
/// subscribers. Keys are carried in their string form so subscribers can
/// recover the entity kind without depending on the schema layer.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    pub partition: String,
    pub sort: String,
    pub attributes: RawAttributes,
}

const CHANGE_FEED_CAPACITY: usize = 64;

pub struct DynamoTable {
    client: Client,
    pub config: DynamoDBConfig,
    changes: broadcast::Sender<ChangeRecord>,
}

impl DynamoTable {
    pub async fn load(config: &DynamoDBConfig) -> anyhow::Result<DynamoTable> {
        let aws_config = aws_config::load_from_env().await;
        let client = Client::new(&aws_config);
        let config = config.clone();
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);

        info!("DynamoDB database configured.");
        Ok(DynamoTable {
            client,
            config,
            changes,
        })
    }

    /// Live feed of every write going through this table.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeRecord> {
        self.changes.subscribe()
    }

    fn publish<K: ToString>(&self, key: &ItemKey<K>, attributes: RawAttributes) {
        // Nobody listening is fine, the event is simply dropped.
        let _ = self.changes.send(ChangeRecord {
            partition: key.partition.to_string(),
            sort: key.sort.to_string(),
            attributes,
        });
    }

    fn build_key_attributes<K: ToString>(&self, key: &ItemKey<K>) -> RawAttributes {
        let mut map = RawAttributes::new();
        map.insert(
            self.config.partition_key.clone(),
            AttributeValue::S(key.partition.to_string()),
        );
        map.insert(
            self.config.sort_key.clone(),
            AttributeValue::S(key.sort.to_string()),
        );
        map
    }

    pub async fn get_item<K, C>(&self, key: &ItemKey<K>, configure: C) -> Result<GetItemOutput>
    where
        K: ToString,
        C: FnOnce(GetItem) -> GetItem,
    {
        let req = self
            .client
            .get_item()
            .table_name(&self.config.table)
            .set_key(Some(self.build_key_attributes(key)));
        configure(req).send().await.map_err(|e| {
            error!("{}", e);
            DynamoDbErrors::RequestFailure
        })
    }

    pub async fn put_item<K>(
        &self,
        key: &ItemKey<K>,
        attributes: RawAttributes,
    ) -> Result<PutItemOutput>
    where
        K: ToString,
    {
        let mut item = self.build_key_attributes(key);
        item.extend(attributes);
        let output = self
            .client
            .put_item()
            .table_name(&self.config.table)
            .set_item(Some(item.clone()))
            .send()
            .await
            .map_err(|e| {
                error!("{}", e);
                DynamoDbErrors::RequestFailure
            })?;
        self.publish(key, item);
        Ok(output)
    }

    /// Writes all items in a single `TransactWriteItems` call. Either every
    /// item lands or none does.
    pub async fn transact_put_items<K>(
        &self,
        items: Vec<(ItemKey<K>, RawAttributes)>,
    ) -> Result<TransactWriteItemsOutput>
    where
        K: ToString,
    {
        let mut req = self.client.transact_write_items();
        let mut images = Vec::with_capacity(items.len());
        for (key, attributes) in items {
            let mut item = self.build_key_attributes(&key);
            item.extend(attributes);
            req = req.transact_items(
                TransactWriteItem::builder()
                    .put(
                        Put::builder()
                            .table_name(&self.config.table)
                            .set_item(Some(item.clone()))
                            .build(),
                    )
                    .build(),
            );
            images.push((key, item));
        }
        let output = req.send().await.map_err(|e| {
            error!("{}", e);
            DynamoDbErrors::RequestFailure
        })?;
        for (key, item) in images {
            self.publish(&key, item);
        }
        Ok(output)
    }

    pub fn scan(&self) -> Scan {
        self.client.scan().table_name(&self.config.table)
    }

    /// Items of a partition whose sort key begins with `prefix`, in sort-key
    /// order.
    pub fn query_partition_by_prefix<K: ToString>(&self, pkey: K, prefix: &str) -> Query {
        self.client
            .query()
            .table_name(&self.config.table)
            .key_condition_expression("#pk = :pk and begins_with(#sk, :sk)")
            .expression_attribute_names("#pk", &self.config.partition_key)
            .expression_attribute_names("#sk", &self.config.sort_key)
            .expression_attribute_values(":pk", AttributeValue::S(pkey.to_string()))
            .expression_attribute_values(":sk", AttributeValue::S(prefix.to_owned()))
    }
}
