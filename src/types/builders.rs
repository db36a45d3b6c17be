//! Builders for the entity models.
//!
//! Every setter runs the field's validator, so a builder can only hold
//! canonical values. Setters accept anything that converts into
//! [`Input`], including the wrong thing, and report it as a
//! [`ValidationError`]:
//!
//! ```
//! use discord_fields::types::{ChannelBuilder, ChannelType};
//!
//! let channel = ChannelBuilder::new()
//!     .kind(ChannelType::GuildForum)?
//!     .name("help")?
//!     .slowmode(30)?
//!     .build();
//! assert_eq!(channel.slowmode, 30);
//!
//! let err = ChannelBuilder::new().slowmode(-1).unwrap_err();
//! assert_eq!(err.to_string(), "`slowmode` must be in range [0:21600], got -1");
//! # Ok::<(), discord_fields::fields::ValidationError>(())
//! ```
//!
//! Nested entities are taken as typed values since they are valid by
//! construction. Use `to_builder()` on a model to edit a copy of it.

use chrono::Duration;

use crate::fields::{FieldValidator, Input, ValidationError};
use crate::types::{
    activity::{self, ActivityParty},
    channel::{self, Channel, ThreadMetadata},
    oauth::{self, Oauth2Access},
    scheduled_event::{self, ScheduledEvent},
    sticker::{self, Sticker},
    user::{self, AvatarDecoration, User},
};

// ===========================================================================
// User builder
// ===========================================================================

/// Builder for [`User`].
#[derive(Clone, Debug, Default)]
pub struct UserBuilder {
    inner: User,
}

impl UserBuilder {
    /// Start from an empty user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user's ID, a snowflake or a [`User`] reference.
    pub fn id(mut self, id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.id = user::VALIDATE_ID.validate(id.into())?;
        Ok(self)
    }

    /// Set the username, 2 to 32 characters.
    pub fn name(mut self, name: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.name = user::VALIDATE_NAME.validate(name.into())?;
        Ok(self)
    }

    /// Set the legacy discriminator, `0` to `9999`.
    pub fn discriminator(mut self, value: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.discriminator = user::VALIDATE_DISCRIMINATOR.validate(value.into())?;
        Ok(self)
    }

    /// Set the display name, 1 to 32 characters.
    pub fn display_name(mut self, display_name: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.display_name = user::VALIDATE_DISPLAY_NAME.validate(display_name.into())?;
        Ok(self)
    }

    /// Set the avatar hash.
    pub fn avatar_hash(mut self, hash: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.avatar_hash = user::VALIDATE_AVATAR_HASH.validate(hash.into())?;
        Ok(self)
    }

    /// Mark the user as a bot.
    pub fn bot(mut self, bot: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.bot = user::VALIDATE_BOT.validate(bot.into())?;
        Ok(self)
    }

    /// Set the public flags from their bits.
    pub fn flags(mut self, flags: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.flags = user::VALIDATE_FLAGS.validate(flags.into())?;
        Ok(self)
    }

    /// Set the avatar decoration.
    pub fn avatar_decoration(mut self, decoration: Option<AvatarDecoration>) -> Self {
        self.inner.avatar_decoration = decoration;
        self
    }

    /// Consume the builder and return the finished [`User`].
    pub fn build(self) -> User {
        self.inner
    }
}

impl User {
    /// A builder starting from a copy of this user.
    pub fn to_builder(&self) -> UserBuilder {
        UserBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// Channel builder
// ===========================================================================

/// Builder for [`Channel`].
#[derive(Clone, Debug, Default)]
pub struct ChannelBuilder {
    inner: Channel,
}

impl ChannelBuilder {
    /// Start from an empty text channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel's ID.
    pub fn id(mut self, id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.id = channel::VALIDATE_ID.validate(id.into())?;
        Ok(self)
    }

    /// Set the channel type, a [`ChannelType`](super::ChannelType) or its
    /// value.
    pub fn kind(mut self, kind: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.kind = channel::VALIDATE_TYPE.validate(kind.into())?;
        Ok(self)
    }

    /// Set the guild.
    pub fn guild_id(mut self, guild_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.guild_id = channel::VALIDATE_GUILD_ID.validate(guild_id.into())?;
        Ok(self)
    }

    /// Set the category, or the parent channel of a thread.
    pub fn parent_id(mut self, parent_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.parent_id = channel::VALIDATE_PARENT_ID.validate(parent_id.into())?;
        Ok(self)
    }

    /// Set the name, 1 to 100 characters.
    pub fn name(mut self, name: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.name = channel::VALIDATE_NAME.validate(name.into())?;
        Ok(self)
    }

    /// Set the topic, up to 4096 characters.
    pub fn topic(mut self, topic: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.topic = channel::VALIDATE_TOPIC.validate(topic.into())?;
        Ok(self)
    }

    /// Set the sorting position.
    pub fn position(mut self, position: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.position = channel::VALIDATE_POSITION.validate(position.into())?;
        Ok(self)
    }

    /// Mark the channel as age-restricted.
    pub fn nsfw(mut self, nsfw: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.nsfw = channel::VALIDATE_NSFW.validate(nsfw.into())?;
        Ok(self)
    }

    /// Set the slowmode in seconds, `0` to `21600`.
    pub fn slowmode(mut self, seconds: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.slowmode = channel::VALIDATE_SLOWMODE.validate(seconds.into())?;
        Ok(self)
    }

    /// Set the flags from their bits.
    pub fn flags(mut self, flags: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.flags = channel::VALIDATE_FLAGS.validate(flags.into())?;
        Ok(self)
    }

    /// Set the forum tags applied to a thread.
    pub fn applied_tag_ids(mut self, tag_ids: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.applied_tag_ids = channel::VALIDATE_APPLIED_TAG_IDS.validate(tag_ids.into())?;
        Ok(self)
    }

    /// Set when the last message was pinned.
    pub fn last_pin_at(mut self, pinned_at: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.last_pin_at = channel::VALIDATE_LAST_PIN_AT.validate(pinned_at.into())?;
        Ok(self)
    }

    /// Set the thread metadata.
    pub fn thread(mut self, thread: Option<ThreadMetadata>) -> Self {
        self.inner.thread = thread;
        self
    }

    /// Consume the builder and return the finished [`Channel`].
    pub fn build(self) -> Channel {
        self.inner
    }
}

impl Channel {
    /// A builder starting from a copy of this channel.
    pub fn to_builder(&self) -> ChannelBuilder {
        ChannelBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// Sticker builder
// ===========================================================================

/// Builder for [`Sticker`].
#[derive(Clone, Debug, Default)]
pub struct StickerBuilder {
    inner: Sticker,
}

impl StickerBuilder {
    /// Start from an empty guild sticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sticker's ID.
    pub fn id(mut self, id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.id = sticker::VALIDATE_ID.validate(id.into())?;
        Ok(self)
    }

    /// Set the name, 2 to 30 characters.
    pub fn name(mut self, name: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.name = sticker::VALIDATE_NAME.validate(name.into())?;
        Ok(self)
    }

    /// Set the description, 2 to 100 characters.
    pub fn description(mut self, description: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.description = sticker::VALIDATE_DESCRIPTION.validate(description.into())?;
        Ok(self)
    }

    /// Set the autocomplete tag.
    pub fn tag(mut self, tag: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.tag = sticker::VALIDATE_TAG.validate(tag.into())?;
        Ok(self)
    }

    /// Set the file format.
    pub fn format(mut self, format: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.format = sticker::VALIDATE_FORMAT.validate(format.into())?;
        Ok(self)
    }

    /// Set whether the sticker is standard or a guild sticker.
    pub fn kind(mut self, kind: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.kind = sticker::VALIDATE_TYPE.validate(kind.into())?;
        Ok(self)
    }

    /// Set the pack of a standard sticker.
    pub fn pack_id(mut self, pack_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.pack_id = sticker::VALIDATE_PACK_ID.validate(pack_id.into())?;
        Ok(self)
    }

    /// Set the guild of a guild sticker.
    pub fn guild_id(mut self, guild_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.guild_id = sticker::VALIDATE_GUILD_ID.validate(guild_id.into())?;
        Ok(self)
    }

    /// Set whether the sticker can be used.
    pub fn available(mut self, available: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.available = sticker::VALIDATE_AVAILABLE.validate(available.into())?;
        Ok(self)
    }

    /// Set the position within the pack; null clears it.
    pub fn sort_value(mut self, sort_value: impl Into<Input>) -> Result<Self, ValidationError> {
        let sort_value = sort_value.into();
        self.inner.sort_value = if sort_value.is_null() {
            None
        } else {
            Some(sticker::VALIDATE_SORT_VALUE.validate(sort_value)?)
        };
        Ok(self)
    }

    /// Set the uploader.
    pub fn user(mut self, user: Option<User>) -> Self {
        self.inner.user = user;
        self
    }

    /// Consume the builder and return the finished [`Sticker`].
    pub fn build(self) -> Sticker {
        self.inner
    }
}

impl Sticker {
    /// A builder starting from a copy of this sticker.
    pub fn to_builder(&self) -> StickerBuilder {
        StickerBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// ScheduledEvent builder
// ===========================================================================

/// Builder for [`ScheduledEvent`].
#[derive(Clone, Debug, Default)]
pub struct ScheduledEventBuilder {
    inner: ScheduledEvent,
}

impl ScheduledEventBuilder {
    /// Start from an empty external event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event's ID.
    pub fn id(mut self, id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.id = scheduled_event::VALIDATE_ID.validate(id.into())?;
        Ok(self)
    }

    /// Set the guild.
    pub fn guild_id(mut self, guild_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.guild_id = scheduled_event::VALIDATE_GUILD_ID.validate(guild_id.into())?;
        Ok(self)
    }

    /// Set the stage or voice channel.
    pub fn channel_id(mut self, channel_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.channel_id = scheduled_event::VALIDATE_CHANNEL_ID.validate(channel_id.into())?;
        Ok(self)
    }

    /// Set the name, 1 to 100 characters.
    pub fn name(mut self, name: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.name = scheduled_event::VALIDATE_NAME.validate(name.into())?;
        Ok(self)
    }

    /// Set the description, 1 to 1000 characters.
    pub fn description(mut self, description: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.description =
            scheduled_event::VALIDATE_DESCRIPTION.validate(description.into())?;
        Ok(self)
    }

    /// Set the start, a date-time, an ISO 8601 string or unix seconds.
    pub fn start_at(mut self, start_at: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.start_at = scheduled_event::VALIDATE_START_AT.validate(start_at.into())?;
        Ok(self)
    }

    /// Set the end, a date-time, an ISO 8601 string or unix seconds.
    pub fn end_at(mut self, end_at: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.end_at = scheduled_event::VALIDATE_END_AT.validate(end_at.into())?;
        Ok(self)
    }

    /// Set the status.
    pub fn status(mut self, status: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.status = scheduled_event::VALIDATE_STATUS.validate(status.into())?;
        Ok(self)
    }

    /// Set where the event takes place.
    pub fn entity_type(mut self, entity_type: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.entity_type =
            scheduled_event::VALIDATE_ENTITY_TYPE.validate(entity_type.into())?;
        Ok(self)
    }

    /// Set who can see the event.
    pub fn privacy_level(mut self, level: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.privacy_level = scheduled_event::VALIDATE_PRIVACY_LEVEL.validate(level.into())?;
        Ok(self)
    }

    /// Set the stage instance.
    pub fn entity_id(mut self, entity_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.entity_id = scheduled_event::VALIDATE_ENTITY_ID.validate(entity_id.into())?;
        Ok(self)
    }

    /// Set the location of an external event, 1 to 100 characters.
    pub fn location(mut self, location: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.location = scheduled_event::VALIDATE_LOCATION.validate(location.into())?;
        Ok(self)
    }

    /// Set the cover image hash.
    pub fn image_hash(mut self, hash: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.image_hash = scheduled_event::VALIDATE_IMAGE_HASH.validate(hash.into())?;
        Ok(self)
    }

    /// Set the creator, a snowflake or a [`User`] reference.
    pub fn creator_id(mut self, creator_id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.creator_id = scheduled_event::VALIDATE_CREATOR_ID.validate(creator_id.into())?;
        Ok(self)
    }

    /// Set the creator, also setting [`creator_id`](Self::creator_id).
    pub fn creator(mut self, creator: Option<User>) -> Self {
        if let Some(creator) = &creator {
            self.inner.creator_id = creator.id;
        }
        self.inner.creator = creator;
        self
    }

    /// Set the number of subscribed users.
    pub fn user_count(mut self, user_count: Option<u32>) -> Self {
        self.inner.user_count = user_count;
        self
    }

    /// Consume the builder and return the finished [`ScheduledEvent`].
    pub fn build(self) -> ScheduledEvent {
        self.inner
    }
}

impl ScheduledEvent {
    /// A builder starting from a copy of this event.
    pub fn to_builder(&self) -> ScheduledEventBuilder {
        ScheduledEventBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// ActivityParty builder
// ===========================================================================

/// Builder for [`ActivityParty`].
#[derive(Clone, Debug, Default)]
pub struct ActivityPartyBuilder {
    inner: ActivityParty,
}

impl ActivityPartyBuilder {
    /// Start from an empty party.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the party's ID.
    pub fn id(mut self, id: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.id = activity::VALIDATE_ID.validate(id.into())?;
        Ok(self)
    }

    /// Set the current and maximum size, as `[size, max]`.
    pub fn size_and_max(mut self, size_and_max: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.size_and_max = activity::VALIDATE_SIZE_AND_MAX.validate(size_and_max.into())?;
        Ok(self)
    }

    /// Consume the builder and return the finished [`ActivityParty`].
    pub fn build(self) -> ActivityParty {
        self.inner
    }
}

impl ActivityParty {
    /// A builder starting from a copy of this party.
    pub fn to_builder(&self) -> ActivityPartyBuilder {
        ActivityPartyBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// Oauth2Access builder
// ===========================================================================

/// Builder for [`Oauth2Access`].
#[derive(Clone, Debug, Default)]
pub struct Oauth2AccessBuilder {
    inner: Oauth2Access,
}

impl Oauth2AccessBuilder {
    /// Start from an empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token.
    pub fn access_token(mut self, token: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.access_token = oauth::VALIDATE_ACCESS_TOKEN.validate(token.into())?;
        Ok(self)
    }

    /// Set the token type.
    pub fn token_type(mut self, token_type: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.token_type = oauth::VALIDATE_TOKEN_TYPE.validate(token_type.into())?;
        Ok(self)
    }

    /// Set the refresh token.
    pub fn refresh_token(mut self, token: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.refresh_token = oauth::VALIDATE_REFRESH_TOKEN.validate(token.into())?;
        Ok(self)
    }

    /// Set the granted scopes, [`Oauth2Scope`](super::Oauth2Scope) members
    /// or their values.
    pub fn scopes(mut self, scopes: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.scopes = oauth::VALIDATE_SCOPES
            .validate(scopes.into())?
            .unwrap_or_default();
        Ok(self)
    }

    /// Set the lifetime in seconds.
    pub fn expires_after(mut self, seconds: impl Into<Input>) -> Result<Self, ValidationError> {
        let seconds = oauth::VALIDATE_EXPIRES_AFTER.validate(seconds.into())?;
        self.inner.expires_after = Duration::seconds(seconds);
        Ok(self)
    }

    /// Set when the token was received.
    pub fn created_at(mut self, created_at: impl Into<Input>) -> Result<Self, ValidationError> {
        self.inner.created_at = oauth::VALIDATE_CREATED_AT.validate(created_at.into())?;
        Ok(self)
    }

    /// Consume the builder and return the finished [`Oauth2Access`].
    pub fn build(self) -> Oauth2Access {
        self.inner
    }
}

impl Oauth2Access {
    /// A builder starting from a copy of this token.
    pub fn to_builder(&self) -> Oauth2AccessBuilder {
        Oauth2AccessBuilder {
            inner: self.clone(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::{
        ActivityPartyBuilder, ChannelBuilder, Oauth2AccessBuilder, ScheduledEventBuilder,
        StickerBuilder, UserBuilder,
    };
    use crate::fields::{Entity, Input, ValidationError};
    use crate::types::{
        channel::{ChannelFlags, ChannelType, ThreadMetadata},
        id::Id,
        oauth::Oauth2Scope,
        scheduled_event::{PrivacyLevel, ScheduledEventEntityType, ScheduledEventStatus},
        sticker::{StickerFormat, StickerPack, StickerType},
        user::User,
    };
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::fmt::Debug;

    fn assert_round_trips<E: Entity + PartialEq + Debug>(entity: &E) {
        for defaults in [false, true] {
            let data = entity.to_data_with(defaults, true);
            assert_eq!(&E::from_data(&data), entity, "defaults: {defaults}, data: {data:?}");
        }
    }

    fn uploader() -> User {
        UserBuilder::new()
            .id(80351110224678912u64)
            .unwrap()
            .name("lalisa")
            .unwrap()
            .bot(true)
            .unwrap()
            .build()
    }

    #[test]
    fn user_builder() {
        let user = UserBuilder::new()
            .id("202304110031")
            .unwrap()
            .name("lalisa")
            .unwrap()
            .discriminator(42)
            .unwrap()
            .bot(true)
            .unwrap()
            .avatar_hash("a_1acefe340fafb4ecefae407f3abdb323")
            .unwrap()
            .build();

        assert_eq!(user.id, Id::new(202304110031));
        assert_eq!(user.discriminator, 42);
        assert!(user.bot);
        assert!(user.avatar_hash.is_some());

        let err = UserBuilder::new().name("a").unwrap_err();
        assert!(err.is_value());
        assert_eq!(err.field(), "name");

        let err = UserBuilder::new().discriminator(10000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`discriminator` must be in range [0:9999], got 10000"
        );
        assert!(UserBuilder::new().bot("yes").unwrap_err().is_type());
    }

    #[test]
    fn to_builder_edits_a_copy() {
        let user = User::from_data(&crate::fields::entity::tests::wire(json!({
            "id": "1",
            "username": "before",
        })));
        let renamed = user.to_builder().name("after").unwrap().build();

        assert_eq!(user.name, "before");
        assert_eq!(renamed.name, "after");
        assert_eq!(renamed.id, user.id);
    }

    #[test]
    fn channel_builder() {
        let parent = ChannelBuilder::new().id(10).unwrap().build();
        let channel = ChannelBuilder::new()
            .kind(ChannelType::PublicThread)
            .unwrap()
            .parent_id(Input::entity(&parent))
            .unwrap()
            .slowmode(21600)
            .unwrap()
            .flags(ChannelFlags::PINNED.bits())
            .unwrap()
            .applied_tag_ids(vec!["3", "1", "3"])
            .unwrap()
            .build();

        assert_eq!(channel.kind, ChannelType::PublicThread);
        assert_eq!(channel.parent_id, Id::new(10));
        assert_eq!(channel.flags, ChannelFlags::PINNED);
        assert_eq!(channel.applied_tag_ids, Some(vec![Id::new(1), Id::new(3)]));

        assert_eq!(
            ChannelBuilder::new().slowmode(-1).unwrap_err(),
            ValidationError::Value {
                field: "slowmode",
                message: "must be in range [0:21600], got -1".to_owned(),
            }
        );
        assert!(ChannelBuilder::new().slowmode("").unwrap_err().is_type());
        assert_eq!(ChannelBuilder::new().slowmode(0).unwrap().build().slowmode, 0);

        let user = User::default();
        assert!(ChannelBuilder::new()
            .parent_id(Input::entity(&user))
            .unwrap_err()
            .is_type());
    }

    #[test]
    fn sticker_builder() {
        let sticker = StickerBuilder::new()
            .name("Wave")
            .unwrap()
            .format(3)
            .unwrap()
            .sort_value(2)
            .unwrap()
            .sort_value(Input::Null)
            .unwrap()
            .build();

        assert_eq!(sticker.format, StickerFormat::Lottie);
        assert_eq!(sticker.sort_value, None);
        assert!(StickerBuilder::new().format("png").unwrap_err().is_type());
        assert!(StickerBuilder::new().sort_value(-3).unwrap_err().is_value());
    }

    #[test]
    fn scheduled_event_builder() {
        let creator = User::from_data(&crate::fields::entity::tests::wire(json!({"id": "7"})));
        let event = ScheduledEventBuilder::new()
            .name("Launch party")
            .unwrap()
            .status(ScheduledEventStatus::Active)
            .unwrap()
            .start_at("2023-04-20T18:00:00+00:00")
            .unwrap()
            .end_at(1682020800)
            .unwrap()
            .location("Rooftop")
            .unwrap()
            .creator(Some(creator))
            .build();

        assert_eq!(event.status, ScheduledEventStatus::Active);
        assert_eq!(
            event.start_at,
            Some(Utc.with_ymd_and_hms(2023, 4, 20, 18, 0, 0).unwrap())
        );
        assert_eq!(
            event.end_at,
            Some(Utc.with_ymd_and_hms(2023, 4, 20, 20, 0, 0).unwrap())
        );
        assert_eq!(event.creator_id, Id::new(7));
        assert!(ScheduledEventBuilder::new().start_at("soon").unwrap_err().is_value());
    }

    #[test]
    fn activity_party_builder() {
        let party = ActivityPartyBuilder::new()
            .size_and_max([10, 20])
            .unwrap()
            .build();

        assert_eq!(
            serde_json::Value::Object(party.to_data(false)),
            json!({"size": [10, 20]})
        );
    }

    #[test]
    fn oauth2_access_builder() {
        let access = Oauth2AccessBuilder::new()
            .access_token("token")
            .unwrap()
            .token_type("Bearer")
            .unwrap()
            .scopes(vec![Oauth2Scope::Identify, Oauth2Scope::Bot])
            .unwrap()
            .expires_after(3600)
            .unwrap()
            .build();

        assert_eq!(access.scopes, vec![Oauth2Scope::Bot, Oauth2Scope::Identify]);
        assert_eq!(access.expires_after, Duration::hours(1));
        assert!(Oauth2AccessBuilder::new().scopes(12.6).unwrap_err().is_type());
        assert!(Oauth2AccessBuilder::new().access_token("").unwrap_err().is_value());
        assert!(Oauth2AccessBuilder::new().expires_after(-1).unwrap_err().is_value());
    }

    #[test]
    fn channel_round_trips() {
        let channel = ChannelBuilder::new()
            .id(1000)
            .unwrap()
            .kind(ChannelType::PublicThread)
            .unwrap()
            .guild_id("20")
            .unwrap()
            .parent_id(10)
            .unwrap()
            .name("help")
            .unwrap()
            .topic("questions go here")
            .unwrap()
            .position(3)
            .unwrap()
            .nsfw(true)
            .unwrap()
            .slowmode(120)
            .unwrap()
            .flags(ChannelFlags::PINNED.bits())
            .unwrap()
            .applied_tag_ids(vec![7, 5])
            .unwrap()
            .last_pin_at("2023-04-11T00:31:00.123456+00:00")
            .unwrap()
            .thread(Some(ThreadMetadata {
                archived: true,
                archived_at: Some(Utc.with_ymd_and_hms(2023, 4, 12, 8, 0, 0).unwrap()),
                locked: true,
                created_at: None,
            }))
            .build();

        assert_round_trips(&channel);
        assert_round_trips(&ChannelBuilder::new().build());
    }

    #[test]
    fn sticker_round_trips() {
        let sticker = StickerBuilder::new()
            .id(749054660769218631u64)
            .unwrap()
            .name("Wave")
            .unwrap()
            .description("Say hello")
            .unwrap()
            .tag("wave")
            .unwrap()
            .format(StickerFormat::Gif)
            .unwrap()
            .kind(StickerType::Guild)
            .unwrap()
            .guild_id(20)
            .unwrap()
            .available(false)
            .unwrap()
            .sort_value(3)
            .unwrap()
            .user(Some(uploader()))
            .build();

        assert_round_trips(&sticker);
        assert_round_trips(&StickerBuilder::new().build());
    }

    #[test]
    fn sticker_pack_round_trips() {
        let sticker = |id: u64, name: &str| {
            StickerBuilder::new()
                .id(id)
                .unwrap()
                .name(name)
                .unwrap()
                .kind(StickerType::Standard)
                .unwrap()
                .pack_id(847199849233514549u64)
                .unwrap()
                .sort_value(id % 10)
                .unwrap()
                .build()
        };
        let pack = StickerPack {
            id: Id::new(847199849233514549),
            name: "Wumpus Beyond".to_owned(),
            description: Some("Say hello to Wumpus!".to_owned()),
            banner_id: Id::new(761773777976819732),
            cover_sticker_id: Id::new(749053689419006003),
            sku_id: Id::new(847199849233514547),
            stickers: Some(vec![
                sticker(749053689419006003, "Wumpus Hello"),
                sticker(749054660769218631, "Wumpus Wave"),
            ]),
        };

        assert_round_trips(&pack);
    }

    #[test]
    fn scheduled_event_round_trips() {
        let event = ScheduledEventBuilder::new()
            .id(5)
            .unwrap()
            .guild_id(20)
            .unwrap()
            .name("Launch party")
            .unwrap()
            .description("Bring snacks")
            .unwrap()
            .start_at("2023-04-20T18:00:00+00:00")
            .unwrap()
            .end_at(1682020800)
            .unwrap()
            .status(ScheduledEventStatus::Scheduled)
            .unwrap()
            .entity_type(ScheduledEventEntityType::External)
            .unwrap()
            .privacy_level(PrivacyLevel::GuildOnly)
            .unwrap()
            .location("Rooftop")
            .unwrap()
            .image_hash("1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d")
            .unwrap()
            .creator(Some(uploader()))
            .user_count(Some(12))
            .build();

        assert_round_trips(&event);

        let voice = ScheduledEventBuilder::new()
            .channel_id(30)
            .unwrap()
            .entity_type(ScheduledEventEntityType::Voice)
            .unwrap()
            .build();
        assert_round_trips(&voice);
    }

    #[test]
    fn oauth2_access_round_trips() {
        let access = Oauth2AccessBuilder::new()
            .access_token("6qrZcUqja7812RVdnEKjpzOL4CvHBFG")
            .unwrap()
            .token_type("Bearer")
            .unwrap()
            .refresh_token("D43f5y0ahjqew82jZ4NViEr2YafMKhue")
            .unwrap()
            .scopes(vec!["identify", "guilds.join", "sso.magic"])
            .unwrap()
            .expires_after(604800)
            .unwrap()
            .created_at("2023-04-11T00:00:00+00:00")
            .unwrap()
            .build();

        assert_round_trips(&access);
    }

    #[test]
    fn activity_party_round_trips() {
        let party = ActivityPartyBuilder::new()
            .id("ae488379-351d-4a4f-ad32-2b9b01c91657")
            .unwrap()
            .size_and_max([2, 4])
            .unwrap()
            .build();

        assert_round_trips(&party);
        assert_round_trips(&ActivityPartyBuilder::new().build());
    }
}
