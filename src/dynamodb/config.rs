use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DynamoDBConfig {
    pub table: String,
    pub partition_key: String,
    pub sort_key: String,
}
