//! Markers for various resource types, such as channels or users.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. If IDs were only 64-bit
//! integers then a sticker's ID may be erroneously used in the place of where
//! a user's ID is required; by using markers it can be ensured that only an
//! ID with a [`UserMarker`] can be used where a user's ID is required.

/// Marker for application IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for channel IDs.
///
/// Types such as [`Channel`] or [`ScheduledEvent`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`ScheduledEvent`]: crate::types::scheduled_event::ScheduledEvent
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for generic IDs, used by field descriptors that are not bound to a
/// single resource.
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// Marker for guild IDs.
///
/// Types such as [`Channel`] or [`Sticker`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`Sticker`]: crate::types::sticker::Sticker
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for scheduled event IDs.
///
/// [`ScheduledEvent`] uses this ID marker.
///
/// [`ScheduledEvent`]: crate::types::scheduled_event::ScheduledEvent
#[derive(Debug)]
#[non_exhaustive]
pub struct ScheduledEventMarker;

/// Marker for scheduled event entity IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ScheduledEventEntityMarker;

/// Marker for SKU IDs.
///
/// Types such as [`AvatarDecoration`] or [`StickerPack`] use this ID marker.
///
/// [`AvatarDecoration`]: crate::types::user::AvatarDecoration
/// [`StickerPack`]: crate::types::sticker::StickerPack
#[derive(Debug)]
#[non_exhaustive]
pub struct SkuMarker;

/// Marker for sticker banner asset IDs.
///
/// [`StickerPack`] uses this ID marker.
///
/// [`StickerPack`]: crate::types::sticker::StickerPack
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerBannerAssetMarker;

/// Marker for sticker IDs.
///
/// Types such as [`Sticker`] or [`StickerPack`] use this ID marker.
///
/// [`Sticker`]: crate::types::sticker::Sticker
/// [`StickerPack`]: crate::types::sticker::StickerPack
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerMarker;

/// Marker for sticker pack IDs.
///
/// Types such as [`Sticker`] or [`StickerPack`] use this ID marker.
///
/// [`Sticker`]: crate::types::sticker::Sticker
/// [`StickerPack`]: crate::types::sticker::StickerPack
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerPackMarker;

/// Marker for forum tag IDs.
///
/// [`Channel::applied_tag_ids`] uses this ID marker.
///
/// [`Channel::applied_tag_ids`]: crate::types::channel::Channel::applied_tag_ids
#[derive(Debug)]
#[non_exhaustive]
pub struct TagMarker;

/// Marker for user IDs.
///
/// Types such as [`User`] or [`BanEntry`] use this ID marker.
///
/// [`User`]: crate::types::user::User
/// [`BanEntry`]: crate::types::guild::BanEntry
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
