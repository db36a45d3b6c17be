//! Guild scheduled events.
//!
//! An external event's location is the only field Discord nests, under
//! `entity_metadata`; it is flattened into [`ScheduledEvent::location`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{
        EntityIdParser, ForceStringParser, FunctionalParser, NullableDateTimeParser,
        NullableEntityParser, NullableStringParser, NullableValueParser, PreinstancedParser,
    },
    putters::{
        EntityIdOptionalPutter, EntityIdPutter, ForceStringPutter, FunctionalOptionalPutter,
        FunctionalPutter, NullableDateTimePutter, NullableEntityPutter, NullableStringPutter,
        NullableValuePutter, PreinstancedPutter,
    },
    validators::{
        EntityIdValidator, ForceStringValidator, NullableDateTimeValidator,
        NullableStringValidator, PreinstancedValidator,
    },
    Entity, FieldParser, FieldPutter, Identified, WireData,
};
use crate::preinstanced;
use crate::types::{
    id::{
        marker::{
            ChannelMarker, GuildMarker, ScheduledEventEntityMarker, ScheduledEventMarker,
            UserMarker,
        },
        Id,
    },
    user::User,
    util::{
        image_hash::{parse_image_hash, put_image_hash, ImageHashValidator},
        ImageHash,
    },
};

preinstanced! {
    /// Lifecycle of a scheduled event.
    pub enum ScheduledEventStatus: u8 {
        /// Not started yet.
        Scheduled = 1,
        /// In progress.
        Active = 2,
        /// Ended.
        Completed = 3,
        /// Called off before it started.
        Canceled = 4,
    }
}

preinstanced! {
    /// Where a scheduled event takes place.
    pub enum ScheduledEventEntityType: u8 {
        /// In a stage channel.
        StageInstance = 1,
        /// In a voice channel.
        Voice = 2,
        /// Somewhere else, see [`ScheduledEvent::location`].
        External = 3,
    }
}

preinstanced! {
    /// Who can see a scheduled event.
    pub enum PrivacyLevel: u8 {
        /// Members of the guild.
        GuildOnly = 2,
    }
}

const PARSE_ID: EntityIdParser<ScheduledEventMarker> = EntityIdParser::new("id");
const PUT_ID_INTO: EntityIdPutter<ScheduledEventMarker> = EntityIdPutter::new("id");
const PARSE_GUILD_ID: EntityIdParser<GuildMarker> = EntityIdParser::new("guild_id");
const PUT_GUILD_ID_INTO: EntityIdPutter<GuildMarker> = EntityIdPutter::new("guild_id");
const PARSE_CHANNEL_ID: EntityIdParser<ChannelMarker> = EntityIdParser::new("channel_id");
const PUT_CHANNEL_ID_INTO: EntityIdPutter<ChannelMarker> = EntityIdPutter::new("channel_id");
const PARSE_NAME: ForceStringParser = ForceStringParser::new("name");
const PUT_NAME_INTO: ForceStringPutter = ForceStringPutter::new("name");
const PARSE_DESCRIPTION: NullableStringParser = NullableStringParser::new("description");
const PUT_DESCRIPTION_INTO: NullableStringPutter = NullableStringPutter::new("description");
const PARSE_START_AT: NullableDateTimeParser =
    NullableDateTimeParser::new("scheduled_start_time");
const PUT_START_AT_INTO: NullableDateTimePutter =
    NullableDateTimePutter::new("scheduled_start_time");
const PARSE_END_AT: NullableDateTimeParser = NullableDateTimeParser::new("scheduled_end_time");
const PUT_END_AT_INTO: NullableDateTimePutter = NullableDateTimePutter::new("scheduled_end_time");
const PARSE_STATUS: PreinstancedParser<ScheduledEventStatus> =
    PreinstancedParser::new("status", ScheduledEventStatus::Scheduled);
const PUT_STATUS_INTO: PreinstancedPutter<ScheduledEventStatus> =
    PreinstancedPutter::new("status", ScheduledEventStatus::Scheduled);
const PARSE_ENTITY_TYPE: PreinstancedParser<ScheduledEventEntityType> =
    PreinstancedParser::new("entity_type", ScheduledEventEntityType::External);
const PUT_ENTITY_TYPE_INTO: PreinstancedPutter<ScheduledEventEntityType> =
    PreinstancedPutter::new("entity_type", ScheduledEventEntityType::External);
const PARSE_PRIVACY_LEVEL: PreinstancedParser<PrivacyLevel> =
    PreinstancedParser::new("privacy_level", PrivacyLevel::GuildOnly);
const PUT_PRIVACY_LEVEL_INTO: PreinstancedPutter<PrivacyLevel> =
    PreinstancedPutter::new("privacy_level", PrivacyLevel::GuildOnly);
const PARSE_ENTITY_ID: EntityIdParser<ScheduledEventEntityMarker> =
    EntityIdParser::new("entity_id");
const PUT_ENTITY_ID_INTO: EntityIdOptionalPutter<ScheduledEventEntityMarker> =
    EntityIdOptionalPutter::new("entity_id");
const PARSE_LOCATION: FunctionalParser<Option<String>> =
    FunctionalParser::new("entity_metadata", parse_location);
const PUT_LOCATION_INTO: FunctionalOptionalPutter<Option<String>> =
    FunctionalOptionalPutter::new("entity_metadata", None, put_location);
const PARSE_IMAGE_HASH: FunctionalParser<Option<ImageHash>> =
    FunctionalParser::new("image", parse_image_hash);
const PUT_IMAGE_HASH_INTO: FunctionalPutter<Option<ImageHash>> =
    FunctionalPutter::new("image", put_image_hash);
const PARSE_CREATOR_ID: EntityIdParser<UserMarker> = EntityIdParser::new("creator_id");
const PUT_CREATOR_ID_INTO: EntityIdOptionalPutter<UserMarker> =
    EntityIdOptionalPutter::new("creator_id");
const PARSE_CREATOR: NullableEntityParser<User> = NullableEntityParser::new("creator");
const PUT_CREATOR_INTO: NullableEntityPutter<User> = NullableEntityPutter::new("creator");
const PARSE_USER_COUNT: NullableValueParser<u32> = NullableValueParser::new("user_count");
const PUT_USER_COUNT_INTO: NullableValuePutter<u32> = NullableValuePutter::new("user_count");

pub(crate) const VALIDATE_ID: EntityIdValidator<ScheduledEventMarker> =
    EntityIdValidator::new("id", Some(ScheduledEvent::NAME));
pub(crate) const VALIDATE_GUILD_ID: EntityIdValidator<GuildMarker> =
    EntityIdValidator::new("guild_id", Some("Guild"));
pub(crate) const VALIDATE_CHANNEL_ID: EntityIdValidator<ChannelMarker> =
    EntityIdValidator::new("channel_id", Some("Channel"));
pub(crate) const VALIDATE_NAME: ForceStringValidator = ForceStringValidator::new("name", 1, 100);
pub(crate) const VALIDATE_DESCRIPTION: NullableStringValidator =
    NullableStringValidator::new("description", 1, 1000);
pub(crate) const VALIDATE_START_AT: NullableDateTimeValidator =
    NullableDateTimeValidator::new("start_at");
pub(crate) const VALIDATE_END_AT: NullableDateTimeValidator =
    NullableDateTimeValidator::new("end_at");
pub(crate) const VALIDATE_STATUS: PreinstancedValidator<ScheduledEventStatus> =
    PreinstancedValidator::new("status", ScheduledEventStatus::Scheduled);
pub(crate) const VALIDATE_ENTITY_TYPE: PreinstancedValidator<ScheduledEventEntityType> =
    PreinstancedValidator::new("entity_type", ScheduledEventEntityType::External);
pub(crate) const VALIDATE_PRIVACY_LEVEL: PreinstancedValidator<PrivacyLevel> =
    PreinstancedValidator::new("privacy_level", PrivacyLevel::GuildOnly);
pub(crate) const VALIDATE_ENTITY_ID: EntityIdValidator<ScheduledEventEntityMarker> =
    EntityIdValidator::new("entity_id", None);
pub(crate) const VALIDATE_CREATOR_ID: EntityIdValidator<UserMarker> =
    EntityIdValidator::new("creator_id", Some(User::NAME));
pub(crate) const VALIDATE_LOCATION: NullableStringValidator =
    NullableStringValidator::new("location", 1, 100);
pub(crate) const VALIDATE_IMAGE_HASH: ImageHashValidator = ImageHashValidator::new("image_hash");

fn parse_location(value: Option<&Value>) -> Option<String> {
    value?
        .get("location")?
        .as_str()
        .filter(|location| !location.is_empty())
        .map(str::to_owned)
}

fn put_location(value: &Option<String>) -> Value {
    let mut metadata = Map::new();
    if let Some(location) = value {
        metadata.insert("location".to_owned(), Value::String(location.clone()));
    }
    Value::Object(metadata)
}

/// An event planned in a guild.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScheduledEvent {
    /// The event's ID.
    pub id: Id<ScheduledEventMarker>,
    /// Guild the event belongs to.
    pub guild_id: Id<GuildMarker>,
    /// Stage or voice channel, [`Id::NONE`] for external events.
    pub channel_id: Id<ChannelMarker>,
    /// Name of the event.
    pub name: String,
    /// Description of the event.
    pub description: Option<String>,
    /// When the event starts.
    pub start_at: Option<DateTime<Utc>>,
    /// When the event ends, required for external events.
    pub end_at: Option<DateTime<Utc>>,
    /// Current status.
    pub status: ScheduledEventStatus,
    /// Where the event takes place.
    pub entity_type: ScheduledEventEntityType,
    /// Who can see the event.
    pub privacy_level: PrivacyLevel,
    /// Stage instance of the event, if any.
    pub entity_id: Id<ScheduledEventEntityMarker>,
    /// Location of external events.
    pub location: Option<String>,
    /// Hash of the cover image.
    pub image_hash: Option<ImageHash>,
    /// User who created the event.
    pub creator_id: Id<UserMarker>,
    /// User who created the event, when Discord sends it.
    pub creator: Option<User>,
    /// Number of users subscribed to the event.
    pub user_count: Option<u32>,
}

impl Default for ScheduledEvent {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            guild_id: Id::NONE,
            channel_id: Id::NONE,
            name: String::new(),
            description: None,
            start_at: None,
            end_at: None,
            status: ScheduledEventStatus::Scheduled,
            entity_type: ScheduledEventEntityType::External,
            privacy_level: PrivacyLevel::GuildOnly,
            entity_id: Id::NONE,
            location: None,
            image_hash: None,
            creator_id: Id::NONE,
            creator: None,
            user_count: None,
        }
    }
}

impl ScheduledEvent {
    /// Whether the event takes place outside of Discord.
    pub fn is_external(&self) -> bool {
        self.entity_type == ScheduledEventEntityType::External
    }
}

impl Entity for ScheduledEvent {
    const NAME: &'static str = "ScheduledEvent";
    const INCLUDES_INTERNALS: bool = true;

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_ID.parse(data),
            guild_id: PARSE_GUILD_ID.parse(data),
            channel_id: PARSE_CHANNEL_ID.parse(data),
            name: PARSE_NAME.parse(data),
            description: PARSE_DESCRIPTION.parse(data),
            start_at: PARSE_START_AT.parse(data),
            end_at: PARSE_END_AT.parse(data),
            status: PARSE_STATUS.parse(data),
            entity_type: PARSE_ENTITY_TYPE.parse(data),
            privacy_level: PARSE_PRIVACY_LEVEL.parse(data),
            entity_id: PARSE_ENTITY_ID.parse(data),
            location: PARSE_LOCATION.parse(data),
            image_hash: PARSE_IMAGE_HASH.parse(data),
            creator_id: PARSE_CREATOR_ID.parse(data),
            creator: PARSE_CREATOR.parse(data),
            user_count: PARSE_USER_COUNT.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_GUILD_ID_INTO.put(&self.guild_id, &mut data, defaults);
        PUT_CHANNEL_ID_INTO.put(&self.channel_id, &mut data, defaults);
        PUT_NAME_INTO.put(&self.name, &mut data, defaults);
        PUT_DESCRIPTION_INTO.put(&self.description, &mut data, defaults);
        PUT_START_AT_INTO.put(&self.start_at, &mut data, defaults);
        PUT_END_AT_INTO.put(&self.end_at, &mut data, defaults);
        PUT_STATUS_INTO.put(&self.status, &mut data, defaults);
        PUT_ENTITY_TYPE_INTO.put(&self.entity_type, &mut data, defaults);
        PUT_PRIVACY_LEVEL_INTO.put(&self.privacy_level, &mut data, defaults);
        PUT_ENTITY_ID_INTO.put(&self.entity_id, &mut data, defaults);
        PUT_LOCATION_INTO.put(&self.location, &mut data, defaults);
        PUT_IMAGE_HASH_INTO.put(&self.image_hash, &mut data, defaults);

        if include_internals {
            PUT_CREATOR_ID_INTO.put(&self.creator_id, &mut data, defaults);
            PUT_CREATOR_INTO.put_with_internals(
                &self.creator,
                &mut data,
                defaults,
                include_internals,
            );
            PUT_USER_COUNT_INTO.put(&self.user_count, &mut data, defaults);
        }

        data
    }
}

impl Identified for ScheduledEvent {
    type Marker = ScheduledEventMarker;

    fn id(&self) -> Id<ScheduledEventMarker> {
        self.id
    }
}

impl_entity_serde!(ScheduledEvent);

#[cfg(test)]
mod tests {
    use super::{PrivacyLevel, ScheduledEvent, ScheduledEventEntityType, ScheduledEventStatus};
    use crate::fields::{entity::tests::wire, Entity};
    use crate::types::id::Id;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn external_event() -> Value {
        json!({
            "id": "1095032372155346944",
            "guild_id": "613425648685547541",
            "channel_id": null,
            "creator_id": "202304110031",
            "name": "Launch party",
            "scheduled_start_time": "2023-04-20T18:00:00+00:00",
            "scheduled_end_time": "2023-04-20T20:00:00+00:00",
            "privacy_level": 2,
            "status": 2,
            "entity_type": 3,
            "entity_id": null,
            "entity_metadata": {"location": "Rooftop"},
            "image": "1acefe340fafb4ecefae407f3abdb323",
            "user_count": 12,
        })
    }

    #[test]
    fn from_data() {
        let event = ScheduledEvent::from_data(&wire(external_event()));

        assert_eq!(event.id, Id::new(1095032372155346944));
        assert!(event.channel_id.is_none());
        assert_eq!(event.status, ScheduledEventStatus::Active);
        assert!(event.is_external());
        assert_eq!(event.privacy_level, PrivacyLevel::GuildOnly);
        assert_eq!(event.location.as_deref(), Some("Rooftop"));
        assert_eq!(
            event.start_at,
            Some(Utc.with_ymd_and_hms(2023, 4, 20, 18, 0, 0).unwrap())
        );
        assert_eq!(event.creator_id, Id::new(202304110031));
        assert_eq!(event.user_count, Some(12));
        assert!(event.image_hash.is_some());
    }

    #[test]
    fn internals_are_opt_in() {
        let event = ScheduledEvent::from_data(&wire(external_event()));

        let public = event.to_data(false);
        assert!(!public.contains_key("creator_id"));
        assert!(!public.contains_key("user_count"));
        assert_eq!(public.get("entity_metadata"), Some(&json!({"location": "Rooftop"})));
        assert_eq!(public.get("channel_id"), Some(&Value::Null));
        assert!(!public.contains_key("entity_type"));
        assert_eq!(public.get("status"), Some(&json!(2)));

        let internal = event.to_data_with(false, true);
        assert_eq!(internal.get("creator_id"), Some(&json!("202304110031")));
        assert_eq!(internal.get("user_count"), Some(&json!(12)));
    }

    #[test]
    fn voice_event_without_location() {
        let event = ScheduledEvent::from_data(&wire(json!({
            "id": "1",
            "channel_id": "2",
            "entity_type": 2,
            "entity_metadata": null,
        })));

        assert_eq!(event.entity_type, ScheduledEventEntityType::Voice);
        assert_eq!(event.location, None);
        assert!(!event.to_data(false).contains_key("entity_metadata"));
        assert_eq!(event.to_data(true).get("entity_metadata"), Some(&json!({})));
    }
}
