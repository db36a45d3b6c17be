//! OAuth2 scopes and access token responses.

mod access;
mod scope;

pub use self::{access::Oauth2Access, scope::Oauth2Scope};

pub(crate) use self::access::{
    VALIDATE_ACCESS_TOKEN, VALIDATE_CREATED_AT, VALIDATE_EXPIRES_AFTER, VALIDATE_REFRESH_TOKEN,
    VALIDATE_SCOPES, VALIDATE_TOKEN_TYPE,
};
