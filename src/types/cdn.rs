//! URLs of images hosted on Discord's CDN.
//!
//! Animated hashes (prefixed `a_`) are served as GIF, everything else as
//! PNG. The functions don't check that an asset exists.

use crate::types::{
    id::{
        marker::{ScheduledEventMarker, StickerBannerAssetMarker, StickerMarker, UserMarker},
        Id,
    },
    sticker::StickerFormat,
    util::ImageHash,
};

/// Base URL of the CDN.
pub const CDN_ENDPOINT: &str = "https://cdn.discordapp.com";

/// Application that owns the sticker pack store assets.
const STICKER_PACK_APPLICATION_ID: u64 = 710_982_414_301_790_216;

/// Number of default avatars for users on the new username system.
const DEFAULT_AVATARS: u64 = 6;

/// Number of default avatars for users with a legacy discriminator.
const LEGACY_DEFAULT_AVATARS: u64 = 5;

const fn image_extension(hash: ImageHash) -> &'static str {
    if hash.is_animated() {
        "gif"
    } else {
        "png"
    }
}

/// Avatar a user uploaded.
pub fn user_avatar_url(user_id: Id<UserMarker>, hash: ImageHash) -> String {
    format!(
        "{CDN_ENDPOINT}/avatars/{user_id}/{hash}.{}",
        image_extension(hash)
    )
}

/// Avatar of a user who didn't upload one.
///
/// Users on the new username system (discriminator `0`) get one of six
/// avatars picked from their ID, legacy users one of five picked from their
/// discriminator.
pub fn default_avatar_url(user_id: Id<UserMarker>, discriminator: u16) -> String {
    let index = if discriminator == 0 {
        (user_id.get() >> 22) % DEFAULT_AVATARS
    } else {
        u64::from(discriminator) % LEGACY_DEFAULT_AVATARS
    };
    format!("{CDN_ENDPOINT}/embed/avatars/{index}.png")
}

/// Decoration drawn around an avatar. Decorations are always PNG, even
/// when animated.
pub fn avatar_decoration_url(asset: ImageHash) -> String {
    format!("{CDN_ENDPOINT}/avatar-decoration-presets/{asset}.png")
}

/// A sticker's file, with the extension of its format.
pub fn sticker_url(sticker_id: Id<StickerMarker>, format: &StickerFormat) -> String {
    let extension = match format {
        StickerFormat::Lottie => "json",
        StickerFormat::Gif => "gif",
        _ => "png",
    };
    format!("{CDN_ENDPOINT}/stickers/{sticker_id}.{extension}")
}

/// Banner of a sticker pack.
pub fn sticker_pack_banner_url(banner_id: Id<StickerBannerAssetMarker>) -> String {
    format!("{CDN_ENDPOINT}/app-assets/{STICKER_PACK_APPLICATION_ID}/store/{banner_id}.png")
}

/// Cover image of a scheduled event.
pub fn scheduled_event_cover_url(event_id: Id<ScheduledEventMarker>, hash: ImageHash) -> String {
    format!("{CDN_ENDPOINT}/guild-events/{event_id}/{hash}.png")
}

#[cfg(test)]
mod tests {
    use super::{
        avatar_decoration_url, default_avatar_url, scheduled_event_cover_url,
        sticker_pack_banner_url, sticker_url, user_avatar_url,
    };
    use crate::types::{id::Id, sticker::StickerFormat, util::ImageHash};

    const STATIC: &str = "1acefe340fafb4ecefae407f3abdb323";
    const ANIMATED: &str = "a_1acefe340fafb4ecefae407f3abdb323";

    #[test]
    fn avatars() {
        let user_id = Id::new(80351110224678912);

        assert_eq!(
            user_avatar_url(user_id, ImageHash::parse(STATIC).unwrap()),
            format!("https://cdn.discordapp.com/avatars/80351110224678912/{STATIC}.png")
        );
        assert_eq!(
            user_avatar_url(user_id, ImageHash::parse(ANIMATED).unwrap()),
            format!("https://cdn.discordapp.com/avatars/80351110224678912/{ANIMATED}.gif")
        );
        assert_eq!(
            avatar_decoration_url(ImageHash::parse(ANIMATED).unwrap()),
            format!("https://cdn.discordapp.com/avatar-decoration-presets/{ANIMATED}.png")
        );
    }

    #[test]
    fn default_avatars() {
        let user_id = Id::new(80351110224678912);

        assert_eq!(
            default_avatar_url(user_id, 1337),
            "https://cdn.discordapp.com/embed/avatars/2.png"
        );
        assert_eq!(
            default_avatar_url(user_id, 0),
            format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                (80351110224678912u64 >> 22) % 6
            )
        );
    }

    #[test]
    fn stickers() {
        let sticker_id = Id::new(749054660769218631);

        assert!(sticker_url(sticker_id, &StickerFormat::Png).ends_with("749054660769218631.png"));
        assert!(sticker_url(sticker_id, &StickerFormat::Apng).ends_with(".png"));
        assert!(sticker_url(sticker_id, &StickerFormat::Lottie).ends_with(".json"));
        assert!(sticker_url(sticker_id, &StickerFormat::Gif).ends_with(".gif"));
        assert!(sticker_url(sticker_id, &StickerFormat::Unknown(9)).ends_with(".png"));
        assert_eq!(
            sticker_pack_banner_url(Id::new(761773777976819732)),
            "https://cdn.discordapp.com/app-assets/710982414301790216/store/761773777976819732.png"
        );
    }

    #[test]
    fn scheduled_event_cover() {
        assert_eq!(
            scheduled_event_cover_url(Id::new(5), ImageHash::parse(STATIC).unwrap()),
            format!("https://cdn.discordapp.com/guild-events/5/{STATIC}.png")
        );
    }
}
