//! Discord domain types.
//!
//! IDs, preinstanced enums and the coercion helpers in [`util`] are always
//! compiled since the field framework builds on them. The entity models and
//! the CDN URL builders sit behind the default `models` feature, so a crate
//! that only wants the framework for its own entities can leave them out.

/// Type-safe IDs with marker types.
pub mod id;

/// Enums with a fixed set of known members.
pub mod preinstanced;

/// Utility types (timestamps, image hashes, snowflake and URL coercion).
pub mod util;

// ---- Entity models ---------------------------------------------------------

/// Rich presence activity parts.
#[cfg(feature = "models")]
pub mod activity;

/// Builders for entity models.
#[cfg(feature = "models")]
pub mod builders;

/// CDN URL builders.
#[cfg(feature = "models")]
pub mod cdn;

/// Channels.
#[cfg(feature = "models")]
pub mod channel;

/// Extension traits for entity models.
#[cfg(feature = "models")]
pub mod ext;

/// Guild bans.
#[cfg(feature = "models")]
pub mod guild;

/// OAuth2 scopes and access tokens.
#[cfg(feature = "models")]
pub mod oauth;

/// Guild scheduled events.
#[cfg(feature = "models")]
pub mod scheduled_event;

/// Stickers and sticker packs.
#[cfg(feature = "models")]
pub mod sticker;

/// Users.
#[cfg(feature = "models")]
pub mod user;

// ===========================================================================
// Convenience re-exports
// ===========================================================================

pub use self::{id::Id, util::Timestamp};

#[cfg(feature = "models")]
pub use self::{
    activity::ActivityParty,
    builders::{
        ActivityPartyBuilder, ChannelBuilder, Oauth2AccessBuilder, ScheduledEventBuilder,
        StickerBuilder, UserBuilder,
    },
    channel::{Channel, ChannelFlags, ChannelType, ThreadMetadata},
    ext::{AssetExt, IdentifiedExt, UserExt},
    guild::BanEntry,
    oauth::{Oauth2Access, Oauth2Scope},
    scheduled_event::{
        PrivacyLevel, ScheduledEvent, ScheduledEventEntityType, ScheduledEventStatus,
    },
    sticker::{Sticker, StickerFormat, StickerPack, StickerType},
    user::{AvatarDecoration, User, UserFlags},
};
