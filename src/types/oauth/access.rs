//! The access token response of the OAuth2 token endpoint.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::Oauth2Scope;
use crate::fields::{
    entity::impl_entity_serde,
    parsers::{ForceStringParser, FunctionalParser, NullableDateTimeParser, NullableStringParser},
    putters::{
        ForceStringPutter, FunctionalPutter, NullableDateTimeOptionalPutter, NullableStringPutter,
    },
    validators::{
        ForceStringValidator, IntConditionalValidator, NullableDateTimeValidator,
        NullableStringValidator, PreinstancedArrayValidator,
    },
    Entity, FieldParser, FieldPutter, WireData,
};
use crate::types::preinstanced::Preinstanced;

const PARSE_ACCESS_TOKEN: ForceStringParser = ForceStringParser::new("access_token");
const PUT_ACCESS_TOKEN_INTO: ForceStringPutter = ForceStringPutter::new("access_token");
const PARSE_TOKEN_TYPE: ForceStringParser = ForceStringParser::new("token_type");
const PUT_TOKEN_TYPE_INTO: ForceStringPutter = ForceStringPutter::new("token_type");
const PARSE_REFRESH_TOKEN: NullableStringParser = NullableStringParser::new("refresh_token");
const PUT_REFRESH_TOKEN_INTO: NullableStringPutter = NullableStringPutter::new("refresh_token");
const PARSE_SCOPES: FunctionalParser<Vec<Oauth2Scope>> =
    FunctionalParser::new("scope", parse_scopes);
const PUT_SCOPES_INTO: FunctionalPutter<Vec<Oauth2Scope>> =
    FunctionalPutter::new("scope", put_scopes);
const PARSE_EXPIRES_AFTER: FunctionalParser<Duration> =
    FunctionalParser::new("expires_in", parse_expires_after);
const PUT_EXPIRES_AFTER_INTO: FunctionalPutter<Duration> =
    FunctionalPutter::new("expires_in", put_expires_after);
const PARSE_CREATED_AT: NullableDateTimeParser = NullableDateTimeParser::new("created_at");
const PUT_CREATED_AT_INTO: NullableDateTimeOptionalPutter =
    NullableDateTimeOptionalPutter::new("created_at");

pub(crate) const VALIDATE_ACCESS_TOKEN: ForceStringValidator =
    ForceStringValidator::new("access_token", 1, usize::MAX);
pub(crate) const VALIDATE_TOKEN_TYPE: ForceStringValidator =
    ForceStringValidator::new("token_type", 1, usize::MAX);
pub(crate) const VALIDATE_REFRESH_TOKEN: NullableStringValidator =
    NullableStringValidator::new("refresh_token", 1, usize::MAX);
pub(crate) const VALIDATE_SCOPES: PreinstancedArrayValidator<Oauth2Scope> =
    PreinstancedArrayValidator::new("scopes");
pub(crate) const VALIDATE_EXPIRES_AFTER: IntConditionalValidator<i64> =
    IntConditionalValidator::new(
        "expires_after",
        0,
        |value| value >= 0 && value <= i128::from(i64::MAX / 1000),
        "must be a non-negative number of seconds, got {}",
    );
pub(crate) const VALIDATE_CREATED_AT: NullableDateTimeValidator =
    NullableDateTimeValidator::new("created_at");

/// Scopes are a single space separated string on the wire.
fn parse_scopes(value: Option<&Value>) -> Vec<Oauth2Scope> {
    let mut scopes: Vec<_> = value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .split_whitespace()
        .map(|scope| Oauth2Scope::get(scope.to_owned()))
        .collect();
    scopes.sort();
    scopes.dedup();
    scopes
}

#[allow(clippy::ptr_arg)]
fn put_scopes(value: &Vec<Oauth2Scope>) -> Value {
    let scopes: Vec<_> = value.iter().map(Oauth2Scope::value).collect();
    Value::String(scopes.join(" "))
}

fn parse_expires_after(value: Option<&Value>) -> Duration {
    value
        .and_then(Value::as_i64)
        .and_then(Duration::try_seconds)
        .unwrap_or_else(Duration::zero)
}

fn put_expires_after(value: &Duration) -> Value {
    Value::from(value.num_seconds())
}

/// An OAuth2 access token response.
///
/// `created_at` is not part of Discord's response; it is recorded by
/// whoever received the token, so it is only written with
/// `include_internals`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Oauth2Access {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Kind of token, usually `Bearer`.
    pub token_type: String,
    /// Token to request a new access token with.
    pub refresh_token: Option<String>,
    /// Granted scopes, sorted and deduplicated.
    pub scopes: Vec<Oauth2Scope>,
    /// Lifetime of the access token.
    pub expires_after: Duration,
    /// When the token was received.
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for Oauth2Access {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            token_type: String::new(),
            refresh_token: None,
            scopes: Vec::new(),
            expires_after: Duration::zero(),
            created_at: None,
        }
    }
}

impl Oauth2Access {
    /// When the access token expires, if it's known when it was received.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.created_at?.checked_add_signed(self.expires_after)
    }

    /// Whether the token has expired at `now`. Tokens with an unknown
    /// creation time never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether `scope` was granted.
    pub fn has_scope(&self, scope: &Oauth2Scope) -> bool {
        self.scopes.binary_search(scope).is_ok()
    }
}

impl Entity for Oauth2Access {
    const NAME: &'static str = "Oauth2Access";
    const INCLUDES_INTERNALS: bool = true;

    fn from_data(data: &WireData) -> Self {
        Self {
            access_token: PARSE_ACCESS_TOKEN.parse(data),
            token_type: PARSE_TOKEN_TYPE.parse(data),
            refresh_token: PARSE_REFRESH_TOKEN.parse(data),
            scopes: PARSE_SCOPES.parse(data),
            expires_after: PARSE_EXPIRES_AFTER.parse(data),
            created_at: PARSE_CREATED_AT.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ACCESS_TOKEN_INTO.put(&self.access_token, &mut data, defaults);
        PUT_TOKEN_TYPE_INTO.put(&self.token_type, &mut data, defaults);
        PUT_REFRESH_TOKEN_INTO.put(&self.refresh_token, &mut data, defaults);
        PUT_SCOPES_INTO.put(&self.scopes, &mut data, defaults);
        PUT_EXPIRES_AFTER_INTO.put(&self.expires_after, &mut data, defaults);

        if include_internals {
            PUT_CREATED_AT_INTO.put(&self.created_at, &mut data, defaults);
        }

        data
    }
}

impl_entity_serde!(Oauth2Access);

#[cfg(test)]
mod tests {
    use super::{Oauth2Access, VALIDATE_SCOPES};
    use crate::fields::{entity::tests::wire, Entity, FieldValidator, Input, ValidationError};
    use crate::types::{oauth::Oauth2Scope, preinstanced::Preinstanced};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::{json, Value};

    fn token() -> Value {
        json!({
            "access_token": "6qrZcUqja7812RVdnEKjpzOL4CvHBFG",
            "token_type": "Bearer",
            "expires_in": 604800,
            "refresh_token": "D43f5y0ahjqew82jZ4NViEr2YafMKhue",
            "scope": "identify bot identify guilds.join",
        })
    }

    #[test]
    fn from_data() {
        let access = Oauth2Access::from_data(&wire(token()));

        assert_eq!(access.token_type, "Bearer");
        assert_eq!(access.expires_after, Duration::days(7));
        assert_eq!(
            access.scopes,
            vec![Oauth2Scope::Bot, Oauth2Scope::GuildsJoin, Oauth2Scope::Identify]
        );
        assert!(access.has_scope(&Oauth2Scope::Bot));
        assert!(!access.has_scope(&Oauth2Scope::Email));
        assert_eq!(access.expires_at(), None);
    }

    #[test]
    fn unknown_scopes_are_kept() {
        let access = Oauth2Access::from_data(&wire(json!({"scope": "identify sso.magic"})));

        assert!(access.scopes[1].is_unknown());
        assert_eq!(
            access.to_data(false).get("scope"),
            Some(&json!("identify sso.magic"))
        );
    }

    #[test]
    fn expiry() {
        let mut access = Oauth2Access::from_data(&wire(token()));
        let received = Utc.with_ymd_and_hms(2023, 4, 11, 0, 0, 0).unwrap();
        access.created_at = Some(received);

        assert_eq!(access.expires_at(), Some(received + Duration::days(7)));
        assert!(!access.is_expired(received + Duration::days(6)));
        assert!(access.is_expired(received + Duration::days(7)));

        assert!(!access.to_data(false).contains_key("created_at"));
        assert!(access.to_data_with(false, true).contains_key("created_at"));
    }

    #[test]
    fn validate_scopes() {
        assert_eq!(
            VALIDATE_SCOPES.validate(Input::from(vec![Oauth2Scope::Bot.value()])),
            Ok(Some(vec![Oauth2Scope::Bot]))
        );
        assert_eq!(
            VALIDATE_SCOPES.validate(Input::from(vec![Oauth2Scope::Identify, Oauth2Scope::Bot])),
            Ok(Some(vec![Oauth2Scope::Bot, Oauth2Scope::Identify]))
        );
        assert_eq!(VALIDATE_SCOPES.validate(Input::from(Vec::<String>::new())), Ok(None));
        assert_eq!(
            VALIDATE_SCOPES.validate(Input::from(12.6)),
            Err(ValidationError::Type {
                field: "scopes",
                expected: "Oauth2Scope",
                found: "float 12.6".to_owned(),
            })
        );
    }
}
