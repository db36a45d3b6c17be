//! Extension traits for the entity models.
//!
//! These add helper methods (`.tag()`, `.avatar_url()`, `.created_at()`,
//! `.url()`) that derive something from a model without being part of its
//! wire data. Import them from `crate::types` to have them in scope.

use chrono::{DateTime, Utc};

use crate::fields::Identified;
use crate::types::{
    cdn,
    scheduled_event::ScheduledEvent,
    sticker::{Sticker, StickerPack},
    user::User,
};

// ===========================================================================
// IdentifiedExt
// ===========================================================================

/// Convenience methods on every entity with a snowflake ID.
pub trait IdentifiedExt {
    /// When the entity was created, decoded from its ID. `None` for
    /// entities without an ID.
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl<E: Identified> IdentifiedExt for E {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        let id = self.id();
        if id.is_none() {
            return None;
        }

        i64::try_from(id.timestamp_ms())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }
}

// ===========================================================================
// UserExt
// ===========================================================================

/// Convenience methods on [`User`].
pub trait UserExt {
    /// The user's avatar, or their default avatar if none is set.
    fn avatar_url(&self) -> String;

    /// The avatar decoration, if the user has one.
    fn avatar_decoration_url(&self) -> Option<String>;

    /// `Username#Discriminator` or just `Username` for the new username system.
    fn tag(&self) -> String;
}

impl UserExt for User {
    fn avatar_url(&self) -> String {
        match self.avatar_hash {
            Some(hash) => cdn::user_avatar_url(self.id, hash),
            None => cdn::default_avatar_url(self.id, self.discriminator),
        }
    }

    fn avatar_decoration_url(&self) -> Option<String> {
        let asset = self.avatar_decoration.as_ref()?.asset?;
        Some(cdn::avatar_decoration_url(asset))
    }

    fn tag(&self) -> String {
        if self.discriminator == 0 {
            self.name.clone()
        } else {
            format!("{}#{:04}", self.name, self.discriminator)
        }
    }
}

// ===========================================================================
// Assets
// ===========================================================================

/// URL of the main image of a model.
pub trait AssetExt {
    /// The image's URL, `None` if the model has none.
    fn url(&self) -> Option<String>;
}

impl AssetExt for Sticker {
    fn url(&self) -> Option<String> {
        Some(cdn::sticker_url(self.id, &self.format))
    }
}

impl AssetExt for StickerPack {
    fn url(&self) -> Option<String> {
        if self.banner_id.is_none() {
            return None;
        }
        Some(cdn::sticker_pack_banner_url(self.banner_id))
    }
}

impl AssetExt for ScheduledEvent {
    fn url(&self) -> Option<String> {
        let hash = self.image_hash?;
        Some(cdn::scheduled_event_cover_url(self.id, hash))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::{AssetExt, IdentifiedExt, UserExt};
    use crate::fields::{entity::tests::wire, Entity};
    use crate::types::{
        scheduled_event::ScheduledEvent,
        sticker::{Sticker, StickerPack},
        user::User,
    };
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn user(discriminator: &str, avatar: Option<&str>) -> User {
        User::from_data(&wire(json!({
            "id": "789",
            "username": "alice",
            "discriminator": discriminator,
            "avatar": avatar,
        })))
    }

    #[test]
    fn user_tag() {
        assert_eq!(user("0001", None).tag(), "alice#0001");
        assert_eq!(user("0", None).tag(), "alice");
    }

    #[test]
    fn user_avatar_url() {
        assert_eq!(
            user("0001", None).avatar_url(),
            "https://cdn.discordapp.com/embed/avatars/1.png"
        );

        let url = user("0", Some("1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d")).avatar_url();
        assert_eq!(
            url,
            "https://cdn.discordapp.com/avatars/789/1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d.png"
        );
        assert_eq!(user("0", None).avatar_decoration_url(), None);
    }

    #[test]
    fn created_at() {
        let user = User::from_data(&wire(json!({"id": "175928847299117063"})));

        let expected =
            Utc.with_ymd_and_hms(2016, 4, 30, 11, 18, 25).unwrap() + Duration::milliseconds(796);
        assert_eq!(user.created_at(), Some(expected));
        assert_eq!(User::default().created_at(), None);
    }

    #[test]
    fn asset_urls() {
        let sticker = Sticker::from_data(&wire(json!({"id": "3", "format_type": 3})));
        assert_eq!(
            sticker.url().as_deref(),
            Some("https://cdn.discordapp.com/stickers/3.json")
        );

        assert_eq!(StickerPack::default().url(), None);
        assert_eq!(ScheduledEvent::default().url(), None);

        let event = ScheduledEvent::from_data(&wire(json!({
            "id": "5",
            "image": "1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d",
        })));
        assert_eq!(
            event.url().as_deref(),
            Some("https://cdn.discordapp.com/guild-events/5/1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d.png")
        );
    }
}
