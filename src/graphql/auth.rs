use async_graphql::{Context, Error, ErrorExtensions, Result};

use crate::auth::JwtService;

use super::errors::Errors;
use super::types::ID;

/// Raw credential as presented by the client, either through the
/// `Authorization` header or the subscription connection payload. Inserted
/// into the request data by the serving layer when present.
pub struct Token(pub String);

const BEARER_SCHEME: &str = "Bearer ";

/// Recovers the caller's identity from the request context.
///
/// A missing credential is the only explicitly handled failure; a credential
/// that does not verify surfaces the verification error as-is.
pub fn require_user_id(ctx: &Context<'_>) -> Result<ID> {
    let token = match ctx.data_opt::<Token>() {
        Some(Token(raw)) => strip_scheme(raw),
        None => return Err(Errors::NotAuthorized.extend()),
    };
    let jwt = ctx.data_unchecked::<JwtService>();
    jwt.verify_token(token).map_err(|e| Error::new(e.to_string()))
}

fn strip_scheme(raw: &str) -> &str {
    raw.strip_prefix(BEARER_SCHEME).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_prefix_is_optional() {
        assert_eq!(strip_scheme("Bearer abc.def"), "abc.def");
        assert_eq!(strip_scheme("abc.def"), "abc.def");
    }
}
