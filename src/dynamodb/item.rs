use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::model::AttributeValue;
use tracing::error;

use super::errors::{DynamoDbErrors, Result};

pub type RawAttributes = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ItemKey<K: ToString> {
    pub partition: K,
    pub sort: K,
}

/// Extension used to access easily attributes from the returned HashMap of the AWS SDK.
pub trait AttributesGetterExt {
    fn get_from_string<F: FromStr>(&self, key: &str) -> Result<F>;
    fn get_string(&self, key: &str) -> Result<&String>;
    /// `None` when the attribute is absent, an error when it has the wrong type.
    fn get_optional_string(&self, key: &str) -> Result<Option<&String>>;
    fn get_string_list(&self, key: &str) -> Result<Vec<&String>>;
}

impl AttributesGetterExt for RawAttributes {
    fn get_from_string<F: FromStr>(&self, key: &str) -> Result<F> {
        let attr_s = get_attr(self, key)?.as_s().map_err(|_| {
            let message = format!("Expected key '{}' to be a string", key);
            error!(message);
            DynamoDbErrors::UnexpectedDataFormat(message)
        })?;
        let parsed: F = attr_s.parse().map_err(|_e| {
            let message = format!("Could not parse '{}'", attr_s);
            error!(message);
            DynamoDbErrors::UnexpectedDataFormat(message)
        })?;
        Ok(parsed)
    }

    fn get_string(&self, key: &str) -> Result<&String> {
        get_attr(self, key)?.as_s().map_err(|_| {
            let message = format!("Expected key '{}' to be a string", key);
            error!(message);
            DynamoDbErrors::UnexpectedDataFormat(message)
        })
    }

    fn get_optional_string(&self, key: &str) -> Result<Option<&String>> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.get_string(key).map(Some),
        }
    }

    fn get_string_list(&self, key: &str) -> Result<Vec<&String>> {
        let attrs = get_attr(self, key)?.as_l().map_err(|_| {
            let message = format!("Expected key '{}' to be a list", key);
            error!(message);
            DynamoDbErrors::UnexpectedDataFormat(message)
        })?;
        attrs
            .iter()
            .map(|attr| {
                attr.as_s().map_err(|_| {
                    let message = format!("Expected elements of '{}' to be strings", key);
                    error!(message);
                    DynamoDbErrors::UnexpectedDataFormat(message)
                })
            })
            .collect()
    }
}

fn get_attr<'a>(map: &'a RawAttributes, key: &str) -> Result<&'a AttributeValue> {
    if let Some(value) = map.get(key) {
        Ok(value)
    } else {
        let message = format!("Missing key '{}'", key);
        error!(message);
        Err(DynamoDbErrors::UnexpectedDataFormat(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> RawAttributes {
        let mut map = RawAttributes::new();
        map.insert("username".into(), AttributeValue::S("alice".into()));
        map.insert(
            "participants".into(),
            AttributeValue::L(vec![
                AttributeValue::S("user#a".into()),
                AttributeValue::S("user#b".into()),
            ]),
        );
        map.insert("count".into(), AttributeValue::N("3".into()));
        map
    }

    #[test]
    fn reads_string_attributes() {
        assert_eq!(attributes().get_string("username").unwrap(), "alice");
    }

    #[test]
    fn missing_attribute_is_an_error() {
        assert!(matches!(
            attributes().get_string("nope"),
            Err(DynamoDbErrors::UnexpectedDataFormat(_))
        ));
    }

    #[test]
    fn optional_string_distinguishes_absent_from_mistyped() {
        let map = attributes();
        assert_eq!(map.get_optional_string("nope").unwrap(), None);
        assert_eq!(
            map.get_optional_string("username").unwrap(),
            Some(&"alice".to_string())
        );
        assert!(map.get_optional_string("count").is_err());
    }

    #[test]
    fn reads_string_lists_in_order() {
        let map = attributes();
        let list = map.get_string_list("participants").unwrap();
        assert_eq!(list, vec!["user#a", "user#b"]);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(attributes().get_string_list("username").is_err());
    }
}
