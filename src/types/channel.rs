//! Guild channels, threads and direct messages.
//!
//! Only the fields shared by every channel kind are modelled. Thread-only
//! state sits in [`ThreadMetadata`], which is present only on threads.

use bitflags::bitflags;
use chrono::{DateTime, Utc};

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{
        BoolParser, EntityIdArrayParser, EntityIdParser, FlagParser, NullableDateTimeParser,
        NullableEntityParser, NullableStringParser, PreinstancedParser, ValueParser,
    },
    putters::{
        BoolPutter, EntityIdArrayOptionalPutter, EntityIdOptionalPutter, EntityIdPutter,
        FlagPutter, NullableDateTimeOptionalPutter, NullableDateTimePutter,
        NullableEntityPutter, NullableStringPutter, PreinstancedPutter, ValuePutter,
    },
    validators::{
        BoolValidator, EntityIdArrayValidator, EntityIdValidator, FlagValidator,
        IntConditionalValidator, NullableDateTimeValidator, NullableStringValidator,
        PreinstancedValidator,
    },
    Entity, FieldParser, FieldPutter, Identified, WireData,
};
use crate::preinstanced;
use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, TagMarker},
    Id,
};

/// Longest slowmode Discord allows, six hours.
pub const MAX_SLOWMODE: u32 = 21_600;

preinstanced! {
    /// The kind of a channel.
    pub enum ChannelType: u8 {
        /// Text channel in a guild.
        GuildText = 0,
        /// Direct message.
        Private = 1,
        /// Voice channel in a guild.
        GuildVoice = 2,
        /// Group direct message.
        Group = 3,
        /// Category containing other channels.
        GuildCategory = 4,
        /// Channel users can follow and crosspost into their own guild.
        GuildAnnouncement = 5,
        /// Thread in an announcement channel.
        AnnouncementThread = 10,
        /// Public thread in a text or forum channel.
        PublicThread = 11,
        /// Invite-only thread in a text channel.
        PrivateThread = 12,
        /// Stage channel.
        GuildStage = 13,
        /// Student hub directory.
        GuildDirectory = 14,
        /// Forum of threads.
        GuildForum = 15,
        /// Media-only forum.
        GuildMedia = 16,
    }
}

impl ChannelType {
    /// Whether channels of this type are threads.
    pub fn is_thread(&self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }

    /// Whether channels of this type belong to a guild.
    pub fn is_guild(&self) -> bool {
        !matches!(self, Self::Private | Self::Group | Self::Unknown(_))
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub struct ChannelFlags: u64 {
        /// Thread is pinned to the top of its forum.
        const PINNED = 1 << 1;
        /// Forum threads need at least one tag.
        const REQUIRE_TAG = 1 << 4;
        /// Media channel hides the download option.
        const HIDE_MEDIA_DOWNLOAD_OPTIONS = 1 << 15;
    }
}

// ---------------------------------------------------------------------------
// ThreadMetadata
// ---------------------------------------------------------------------------

const PARSE_ARCHIVED: BoolParser = BoolParser::new("archived", false);
const PUT_ARCHIVED_INTO: BoolPutter = BoolPutter::new("archived", false);
const PARSE_ARCHIVED_AT: NullableDateTimeParser = NullableDateTimeParser::new("archive_timestamp");
const PUT_ARCHIVED_AT_INTO: NullableDateTimePutter =
    NullableDateTimePutter::new("archive_timestamp");
const PARSE_LOCKED: BoolParser = BoolParser::new("locked", false);
const PUT_LOCKED_INTO: BoolPutter = BoolPutter::new("locked", false);
const PARSE_CREATED_AT: NullableDateTimeParser = NullableDateTimeParser::new("create_timestamp");
const PUT_CREATED_AT_INTO: NullableDateTimeOptionalPutter =
    NullableDateTimeOptionalPutter::new("create_timestamp");

/// Thread-only channel state.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ThreadMetadata {
    /// Whether the thread is archived.
    pub archived: bool,
    /// When the archive status last changed.
    pub archived_at: Option<DateTime<Utc>>,
    /// Whether only moderators can unarchive the thread.
    pub locked: bool,
    /// When the thread was created, unset for threads older than 2022-01-09.
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for ThreadMetadata {
    const NAME: &'static str = "ThreadMetadata";

    fn from_data(data: &WireData) -> Self {
        Self {
            archived: PARSE_ARCHIVED.parse(data),
            archived_at: PARSE_ARCHIVED_AT.parse(data),
            locked: PARSE_LOCKED.parse(data),
            created_at: PARSE_CREATED_AT.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, _include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ARCHIVED_INTO.put(&self.archived, &mut data, defaults);
        PUT_ARCHIVED_AT_INTO.put(&self.archived_at, &mut data, defaults);
        PUT_LOCKED_INTO.put(&self.locked, &mut data, defaults);
        PUT_CREATED_AT_INTO.put(&self.created_at, &mut data, defaults);
        data
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

const PARSE_ID: EntityIdParser<ChannelMarker> = EntityIdParser::new("id");
const PUT_ID_INTO: EntityIdPutter<ChannelMarker> = EntityIdPutter::new("id");
const PARSE_TYPE: PreinstancedParser<ChannelType> =
    PreinstancedParser::new("type", ChannelType::GuildText);
const PUT_TYPE_INTO: PreinstancedPutter<ChannelType> =
    PreinstancedPutter::new("type", ChannelType::GuildText);
const PARSE_GUILD_ID: EntityIdParser<GuildMarker> = EntityIdParser::new("guild_id");
const PUT_GUILD_ID_INTO: EntityIdOptionalPutter<GuildMarker> =
    EntityIdOptionalPutter::new("guild_id");
const PARSE_PARENT_ID: EntityIdParser<ChannelMarker> = EntityIdParser::new("parent_id");
const PUT_PARENT_ID_INTO: EntityIdOptionalPutter<ChannelMarker> =
    EntityIdOptionalPutter::new("parent_id");
const PARSE_NAME: NullableStringParser = NullableStringParser::new("name");
const PUT_NAME_INTO: NullableStringPutter = NullableStringPutter::new("name");
const PARSE_TOPIC: NullableStringParser = NullableStringParser::new("topic");
const PUT_TOPIC_INTO: NullableStringPutter = NullableStringPutter::new("topic");
const PARSE_POSITION: ValueParser<u32> = ValueParser::new("position", 0);
const PUT_POSITION_INTO: ValuePutter<u32> = ValuePutter::new("position", 0);
const PARSE_NSFW: BoolParser = BoolParser::new("nsfw", false);
const PUT_NSFW_INTO: BoolPutter = BoolPutter::new("nsfw", false);
const PARSE_SLOWMODE: ValueParser<u32> = ValueParser::new("rate_limit_per_user", 0);
const PUT_SLOWMODE_INTO: ValuePutter<u32> = ValuePutter::new("rate_limit_per_user", 0);
const PARSE_FLAGS: FlagParser<ChannelFlags> = FlagParser::new("flags", ChannelFlags::empty());
const PUT_FLAGS_INTO: FlagPutter<ChannelFlags> = FlagPutter::new("flags", ChannelFlags::empty());
const PARSE_APPLIED_TAG_IDS: EntityIdArrayParser<TagMarker> =
    EntityIdArrayParser::new("applied_tags");
const PUT_APPLIED_TAG_IDS_INTO: EntityIdArrayOptionalPutter<TagMarker> =
    EntityIdArrayOptionalPutter::new("applied_tags");
const PARSE_LAST_PIN_AT: NullableDateTimeParser = NullableDateTimeParser::new("last_pin_timestamp");
const PUT_LAST_PIN_AT_INTO: NullableDateTimeOptionalPutter =
    NullableDateTimeOptionalPutter::new("last_pin_timestamp");
const PARSE_THREAD: NullableEntityParser<ThreadMetadata> =
    NullableEntityParser::new("thread_metadata");
const PUT_THREAD_INTO: NullableEntityPutter<ThreadMetadata> =
    NullableEntityPutter::new("thread_metadata");

pub(crate) const VALIDATE_ID: EntityIdValidator<ChannelMarker> =
    EntityIdValidator::new("id", Some(Channel::NAME));
pub(crate) const VALIDATE_TYPE: PreinstancedValidator<ChannelType> =
    PreinstancedValidator::new("kind", ChannelType::GuildText);
pub(crate) const VALIDATE_GUILD_ID: EntityIdValidator<GuildMarker> =
    EntityIdValidator::new("guild_id", Some("Guild"));
pub(crate) const VALIDATE_PARENT_ID: EntityIdValidator<ChannelMarker> =
    EntityIdValidator::new("parent_id", Some(Channel::NAME));
pub(crate) const VALIDATE_NAME: NullableStringValidator =
    NullableStringValidator::new("name", 1, 100);
pub(crate) const VALIDATE_TOPIC: NullableStringValidator =
    NullableStringValidator::new("topic", 0, 4096);
pub(crate) const VALIDATE_POSITION: IntConditionalValidator<u32> = IntConditionalValidator::new(
    "position",
    0,
    |value| value >= 0 && value <= i128::from(u32::MAX),
    "must be a non-negative 32-bit integer, got {}",
);
pub(crate) const VALIDATE_NSFW: BoolValidator = BoolValidator::new("nsfw", false);
pub(crate) const VALIDATE_SLOWMODE: IntConditionalValidator<u32> = IntConditionalValidator::new(
    "slowmode",
    0,
    |value| (0..=MAX_SLOWMODE as i128).contains(&value),
    "must be in range [0:21600], got {}",
);
pub(crate) const VALIDATE_FLAGS: FlagValidator<ChannelFlags> = FlagValidator::new("flags");
pub(crate) const VALIDATE_APPLIED_TAG_IDS: EntityIdArrayValidator<TagMarker> =
    EntityIdArrayValidator::new("applied_tag_ids", Some("Tag"));
pub(crate) const VALIDATE_LAST_PIN_AT: NullableDateTimeValidator =
    NullableDateTimeValidator::new("last_pin_at");

/// A guild channel, thread or private conversation.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Channel {
    /// The channel's ID.
    pub id: Id<ChannelMarker>,
    /// What kind of channel this is.
    pub kind: ChannelType,
    /// Guild the channel belongs to, [`Id::NONE`] for private channels.
    pub guild_id: Id<GuildMarker>,
    /// Category of a guild channel, or the parent channel of a thread.
    pub parent_id: Id<ChannelMarker>,
    /// Channel name.
    pub name: Option<String>,
    /// Channel topic.
    pub topic: Option<String>,
    /// Sorting position.
    pub position: u32,
    /// Whether the channel is age-restricted.
    pub nsfw: bool,
    /// Seconds a user has to wait between messages.
    pub slowmode: u32,
    /// Channel flags.
    pub flags: ChannelFlags,
    /// Forum tags applied to a thread, sorted.
    pub applied_tag_ids: Option<Vec<Id<TagMarker>>>,
    /// When the last message was pinned.
    pub last_pin_at: Option<DateTime<Utc>>,
    /// Archive state, threads only.
    pub thread: Option<ThreadMetadata>,
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            kind: ChannelType::GuildText,
            guild_id: Id::NONE,
            parent_id: Id::NONE,
            name: None,
            topic: None,
            position: 0,
            nsfw: false,
            slowmode: 0,
            flags: ChannelFlags::empty(),
            applied_tag_ids: None,
            last_pin_at: None,
            thread: None,
        }
    }
}

impl Entity for Channel {
    const NAME: &'static str = "Channel";

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_ID.parse(data),
            kind: PARSE_TYPE.parse(data),
            guild_id: PARSE_GUILD_ID.parse(data),
            parent_id: PARSE_PARENT_ID.parse(data),
            name: PARSE_NAME.parse(data),
            topic: PARSE_TOPIC.parse(data),
            position: PARSE_POSITION.parse(data),
            nsfw: PARSE_NSFW.parse(data),
            slowmode: PARSE_SLOWMODE.parse(data),
            flags: PARSE_FLAGS.parse(data),
            applied_tag_ids: PARSE_APPLIED_TAG_IDS.parse(data),
            last_pin_at: PARSE_LAST_PIN_AT.parse(data),
            thread: PARSE_THREAD.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, _include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_TYPE_INTO.put(&self.kind, &mut data, defaults);
        PUT_GUILD_ID_INTO.put(&self.guild_id, &mut data, defaults);
        PUT_PARENT_ID_INTO.put(&self.parent_id, &mut data, defaults);
        PUT_NAME_INTO.put(&self.name, &mut data, defaults);
        PUT_TOPIC_INTO.put(&self.topic, &mut data, defaults);
        PUT_POSITION_INTO.put(&self.position, &mut data, defaults);
        PUT_NSFW_INTO.put(&self.nsfw, &mut data, defaults);
        PUT_SLOWMODE_INTO.put(&self.slowmode, &mut data, defaults);
        PUT_FLAGS_INTO.put(&self.flags, &mut data, defaults);
        PUT_APPLIED_TAG_IDS_INTO.put(&self.applied_tag_ids, &mut data, defaults);
        PUT_LAST_PIN_AT_INTO.put(&self.last_pin_at, &mut data, defaults);
        if self.thread.is_some() || defaults {
            PUT_THREAD_INTO.put(&self.thread, &mut data, defaults);
        }
        data
    }
}

impl Identified for Channel {
    type Marker = ChannelMarker;

    fn id(&self) -> Id<ChannelMarker> {
        self.id
    }
}

impl_entity_serde!(Channel);

#[cfg(test)]
mod tests {
    use super::{Channel, ChannelFlags, ChannelType, VALIDATE_SLOWMODE};
    use crate::fields::{entity::tests::wire, Entity, FieldValidator, Input, ValidationError};
    use crate::types::id::Id;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn forum_post() -> Value {
        json!({
            "id": "1098294474221224037",
            "type": 11,
            "guild_id": "613425648685547541",
            "parent_id": "1019642340236845096",
            "name": "Help!",
            "rate_limit_per_user": 30,
            "flags": 2,
            "applied_tags": ["20", "10"],
            "last_pin_timestamp": "2023-04-11T00:31:00+00:00",
            "thread_metadata": {
                "archived": true,
                "archive_timestamp": "2023-04-12T00:00:00+00:00",
                "locked": false,
                "create_timestamp": "2023-04-11T00:31:00+00:00",
            },
        })
    }

    #[test]
    fn from_data() {
        let channel = Channel::from_data(&wire(forum_post()));

        assert_eq!(channel.kind, ChannelType::PublicThread);
        assert!(channel.kind.is_thread());
        assert!(channel.kind.is_guild());
        assert_eq!(channel.parent_id, Id::new(1019642340236845096));
        assert_eq!(channel.slowmode, 30);
        assert_eq!(channel.flags, ChannelFlags::PINNED);
        assert_eq!(channel.applied_tag_ids, Some(vec![Id::new(10), Id::new(20)]));
        assert_eq!(
            channel.last_pin_at,
            Some(Utc.with_ymd_and_hms(2023, 4, 11, 0, 31, 0).unwrap())
        );

        let thread = channel.thread.unwrap();
        assert!(thread.archived);
        assert_eq!(
            thread.archived_at,
            Some(Utc.with_ymd_and_hms(2023, 4, 12, 0, 0, 0).unwrap())
        );
        assert_eq!(thread.created_at, channel.last_pin_at);
    }

    #[test]
    fn thread_metadata_is_written_when_present() {
        let channel = Channel::from_data(&wire(forum_post()));
        let data = channel.to_data(false);

        assert_eq!(data["thread_metadata"]["archived"], json!(true));
        assert!(data["thread_metadata"].get("locked").is_none());
        assert!(data["thread_metadata"]["archive_timestamp"].is_string());
    }

    #[test]
    fn minimal_payload_omits_defaults() {
        let channel = Channel::from_data(&wire(json!({"id": "5", "type": 1})));

        assert_eq!(channel.kind, ChannelType::Private);
        assert!(!channel.kind.is_guild());
        assert_eq!(
            Value::Object(channel.to_data(false)),
            json!({"id": "5", "type": 1})
        );

        let complete = channel.to_data(true);
        assert_eq!(complete.get("guild_id"), Some(&Value::Null));
        assert_eq!(complete.get("rate_limit_per_user"), Some(&json!(0)));
        assert_eq!(complete.get("applied_tags"), Some(&json!([])));
    }

    #[test]
    fn slowmode_range() {
        assert_eq!(VALIDATE_SLOWMODE.validate(Input::from(21600)), Ok(21600));
        assert_eq!(VALIDATE_SLOWMODE.validate(Input::Null), Ok(0));
        assert_eq!(
            VALIDATE_SLOWMODE.validate(Input::from(-1)).unwrap_err(),
            ValidationError::Value {
                field: "slowmode",
                message: "must be in range [0:21600], got -1".to_owned(),
            }
        );
    }
}
