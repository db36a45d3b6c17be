//! Guild ban entries.

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{DefaultEntityParser, NullableStringParser},
    putters::{DefaultEntityPutter, NullableStringPutter},
    Entity, FieldParser, FieldPutter, WireData,
};
use crate::types::user::User;

const PARSE_REASON: NullableStringParser = NullableStringParser::new("reason");
const PUT_REASON_INTO: NullableStringPutter = NullableStringPutter::new("reason");
const PARSE_USER: DefaultEntityParser<User> =
    DefaultEntityParser::with_factory("user", User::default);
const PUT_USER_INTO: DefaultEntityPutter<User> =
    DefaultEntityPutter::with_factory("user", User::default);

/// A user banned from a guild.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BanEntry {
    /// The reason given for the ban.
    pub reason: Option<String>,
    /// The banned user.
    pub user: User,
}

impl Entity for BanEntry {
    const NAME: &'static str = "BanEntry";

    fn from_data(data: &WireData) -> Self {
        Self {
            reason: PARSE_REASON.parse(data),
            user: PARSE_USER.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_REASON_INTO.put(&self.reason, &mut data, defaults);
        PUT_USER_INTO.put_with_internals(&self.user, &mut data, defaults, include_internals);
        data
    }
}

impl_entity_serde!(BanEntry);
