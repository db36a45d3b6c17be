//! Discord users and their avatar decorations.
//!
//! A user's ID is always written, as `null` when unset. See
//! [`UserExt`](super::ext::UserExt) for avatar URLs and tags.

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{
        BoolParser, EntityIdParser, FlagParser, ForceStringParser, FunctionalParser,
        NullableEntityParser, NullableStringParser,
    },
    putters::{
        BoolPutter, EntityIdOptionalPutter, EntityIdPutter, FlagPutter, ForceStringPutter,
        FunctionalOptionalPutter, FunctionalPutter, NullableEntityPutter, NullableStringPutter,
    },
    validators::{
        BoolValidator, EntityIdValidator, FlagValidator, ForceStringValidator,
        IntConditionalValidator, NullableStringValidator,
    },
    Entity, FieldParser, FieldPutter, Identified, WireData,
};
use crate::types::{
    id::{
        marker::{SkuMarker, UserMarker},
        Id,
    },
    util::{
        datetime::timestamp_to_datetime,
        image_hash::{parse_image_hash, put_image_hash, ImageHashValidator},
        ImageHash,
    },
};

bitflags! {
    /// Badges shown on a user's profile.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub struct UserFlags: u64 {
        /// Discord employee.
        const STAFF = 1;
        /// Partnered server owner.
        const PARTNER = 1 << 1;
        /// HypeSquad events member.
        const HYPESQUAD = 1 << 2;
        /// Bug hunter level 1.
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        /// House Bravery member.
        const HYPESQUAD_ONLINE_HOUSE_1 = 1 << 6;
        /// House Brilliance member.
        const HYPESQUAD_ONLINE_HOUSE_2 = 1 << 7;
        /// House Balance member.
        const HYPESQUAD_ONLINE_HOUSE_3 = 1 << 8;
        /// Early Nitro supporter.
        const PREMIUM_EARLY_SUPPORTER = 1 << 9;
        /// User is a team.
        const TEAM_PSEUDO_USER = 1 << 10;
        /// Bug hunter level 2.
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        /// Verified bot.
        const VERIFIED_BOT = 1 << 16;
        /// Early verified bot developer.
        const VERIFIED_DEVELOPER = 1 << 17;
        /// Moderator programs alumni.
        const CERTIFIED_MODERATOR = 1 << 18;
        /// Bot uses only HTTP interactions.
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        /// Active developer.
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}

// ---------------------------------------------------------------------------
// AvatarDecoration
// ---------------------------------------------------------------------------

const PARSE_ASSET: FunctionalParser<Option<ImageHash>> =
    FunctionalParser::new("asset", parse_image_hash);
const PUT_ASSET_INTO: FunctionalPutter<Option<ImageHash>> =
    FunctionalPutter::new("asset", put_image_hash);
const PARSE_SKU_ID: EntityIdParser<SkuMarker> = EntityIdParser::new("sku_id");
const PUT_SKU_ID_INTO: EntityIdOptionalPutter<SkuMarker> = EntityIdOptionalPutter::new("sku_id");
const PARSE_EXPIRES_AT: FunctionalParser<Option<DateTime<Utc>>> =
    FunctionalParser::new("expires_at", parse_expires_at);
const PUT_EXPIRES_AT_INTO: FunctionalOptionalPutter<Option<DateTime<Utc>>> =
    FunctionalOptionalPutter::new("expires_at", None, put_expires_at);

fn parse_expires_at(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value.and_then(timestamp_to_datetime)
}

/// Avatar decorations expire as unix seconds, unlike most date-times.
fn put_expires_at(value: &Option<DateTime<Utc>>) -> Value {
    value.map_or(Value::Null, |expires_at| Value::from(expires_at.timestamp()))
}

/// Decoration drawn around a user's avatar.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AvatarDecoration {
    /// Hash of the decoration image.
    pub asset: Option<ImageHash>,
    /// ID of the SKU the decoration was bought with.
    pub sku_id: Id<SkuMarker>,
    /// When the decoration expires, if ever.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entity for AvatarDecoration {
    const NAME: &'static str = "AvatarDecoration";

    fn from_data(data: &WireData) -> Self {
        Self {
            asset: PARSE_ASSET.parse(data),
            sku_id: PARSE_SKU_ID.parse(data),
            expires_at: PARSE_EXPIRES_AT.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, _include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ASSET_INTO.put(&self.asset, &mut data, defaults);
        PUT_SKU_ID_INTO.put(&self.sku_id, &mut data, defaults);
        PUT_EXPIRES_AT_INTO.put(&self.expires_at, &mut data, defaults);
        data
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

const PARSE_ID: EntityIdParser<UserMarker> = EntityIdParser::new("id");
const PUT_ID_INTO: EntityIdPutter<UserMarker> = EntityIdPutter::new("id");
const PARSE_NAME: ForceStringParser = ForceStringParser::new("username");
const PUT_NAME_INTO: ForceStringPutter = ForceStringPutter::new("username");
const PARSE_DISCRIMINATOR: FunctionalParser<u16> =
    FunctionalParser::new("discriminator", parse_discriminator);
const PUT_DISCRIMINATOR_INTO: FunctionalOptionalPutter<u16> =
    FunctionalOptionalPutter::new("discriminator", 0, put_discriminator);
const PARSE_DISPLAY_NAME: NullableStringParser = NullableStringParser::new("global_name");
const PUT_DISPLAY_NAME_INTO: NullableStringPutter = NullableStringPutter::new("global_name");
const PARSE_AVATAR_HASH: FunctionalParser<Option<ImageHash>> =
    FunctionalParser::new("avatar", parse_image_hash);
const PUT_AVATAR_HASH_INTO: FunctionalPutter<Option<ImageHash>> =
    FunctionalPutter::new("avatar", put_image_hash);
const PARSE_BOT: BoolParser = BoolParser::new("bot", false);
const PUT_BOT_INTO: BoolPutter = BoolPutter::new("bot", false);
const PARSE_FLAGS: FlagParser<UserFlags> = FlagParser::new("public_flags", UserFlags::empty());
const PUT_FLAGS_INTO: FlagPutter<UserFlags> = FlagPutter::new("public_flags", UserFlags::empty());
const PARSE_AVATAR_DECORATION: NullableEntityParser<AvatarDecoration> =
    NullableEntityParser::new("avatar_decoration_data");
const PUT_AVATAR_DECORATION_INTO: NullableEntityPutter<AvatarDecoration> =
    NullableEntityPutter::new("avatar_decoration_data");

pub(crate) const VALIDATE_ID: EntityIdValidator<UserMarker> =
    EntityIdValidator::new("id", Some(User::NAME));
pub(crate) const VALIDATE_NAME: ForceStringValidator = ForceStringValidator::new("name", 2, 32);
pub(crate) const VALIDATE_DISCRIMINATOR: IntConditionalValidator<u16> =
    IntConditionalValidator::new(
        "discriminator",
        0,
        |value| (0..=9999).contains(&value),
        "must be in range [0:9999], got {}",
    );
pub(crate) const VALIDATE_DISPLAY_NAME: NullableStringValidator =
    NullableStringValidator::new("display_name", 1, 32);
pub(crate) const VALIDATE_AVATAR_HASH: ImageHashValidator = ImageHashValidator::new("avatar_hash");
pub(crate) const VALIDATE_BOT: BoolValidator = BoolValidator::new("bot", false);
pub(crate) const VALIDATE_FLAGS: FlagValidator<UserFlags> = FlagValidator::new("flags");

/// Discriminators are zero-padded strings on the wire, `"0"` for migrated
/// usernames.
fn parse_discriminator(value: Option<&Value>) -> u16 {
    match value {
        Some(Value::String(raw)) => raw.parse().unwrap_or(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|raw| u16::try_from(raw).ok())
            .unwrap_or(0),
        _ => 0,
    }
}

fn put_discriminator(value: &u16) -> Value {
    Value::String(format!("{value:04}"))
}

/// A Discord user.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct User {
    /// The user's ID.
    pub id: Id<UserMarker>,
    /// Unique username.
    pub name: String,
    /// Legacy four digit tag, `0` for users on the new username system.
    pub discriminator: u16,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Hash of the user's avatar.
    pub avatar_hash: Option<ImageHash>,
    /// Whether the user is a bot.
    pub bot: bool,
    /// Public profile badges.
    pub flags: UserFlags,
    /// Decoration drawn around the avatar.
    pub avatar_decoration: Option<AvatarDecoration>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            name: String::new(),
            discriminator: 0,
            display_name: None,
            avatar_hash: None,
            bot: false,
            flags: UserFlags::empty(),
            avatar_decoration: None,
        }
    }
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_ID.parse(data),
            name: PARSE_NAME.parse(data),
            discriminator: PARSE_DISCRIMINATOR.parse(data),
            display_name: PARSE_DISPLAY_NAME.parse(data),
            avatar_hash: PARSE_AVATAR_HASH.parse(data),
            bot: PARSE_BOT.parse(data),
            flags: PARSE_FLAGS.parse(data),
            avatar_decoration: PARSE_AVATAR_DECORATION.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_NAME_INTO.put(&self.name, &mut data, defaults);
        PUT_DISCRIMINATOR_INTO.put(&self.discriminator, &mut data, defaults);
        PUT_DISPLAY_NAME_INTO.put(&self.display_name, &mut data, defaults);
        PUT_AVATAR_HASH_INTO.put(&self.avatar_hash, &mut data, defaults);
        PUT_BOT_INTO.put(&self.bot, &mut data, defaults);
        PUT_FLAGS_INTO.put(&self.flags, &mut data, defaults);
        PUT_AVATAR_DECORATION_INTO.put_with_internals(
            &self.avatar_decoration,
            &mut data,
            defaults,
            include_internals,
        );
        data
    }
}

impl Identified for User {
    type Marker = UserMarker;

    fn id(&self) -> Id<UserMarker> {
        self.id
    }
}

impl_entity_serde!(User, AvatarDecoration);
