use async_graphql::{Error, ErrorExtensions, Result};

use super::types::ID;

#[derive(Debug, thiserror::Error)]
pub enum Errors {
    #[error("Not authorized")]
    NotAuthorized,

    #[error("Could not find resource")]
    NotFound,

    #[error("Invalid value")]
    InvalidValue(String),
}

impl ErrorExtensions for Errors {
    fn extend(&self) -> Error {
        self.extend_with(|err, e| match err {
            Errors::NotAuthorized => e.set("code", "NOT_AUTHORIZED"),
            Errors::NotFound => e.set("code", "NOT_FOUND"),
            Errors::InvalidValue(details) => {
                e.set("code", "INVALID_VALUE");
                e.set("details", details.clone());
            }
        })
    }
}

pub fn check_id_kind(id: &ID, type_name: &str) -> Result<()> {
    if id.has_type_name(type_name) {
        Ok(())
    } else {
        Err(Errors::InvalidValue(format!("Expected a '{}' identifier, got '{}'", type_name, id))
            .extend())
    }
}
