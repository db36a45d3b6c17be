//! Stickers and the packs Discord sells them in.
//!
//! Guild stickers carry their guild ID and uploader, which Discord sends but
//! never accepts back, so [`Sticker`] writes those only with
//! `include_internals`.

use crate::fields::{
    entity::impl_entity_serde,
    parsers::{
        BoolParser, EntityIdParser, ForceStringParser, NullableEntityArrayParser,
        NullableEntityParser, NullableStringParser, NullableValueParser, PreinstancedParser,
    },
    putters::{
        BoolPutter, EntityIdOptionalPutter, EntityIdPutter, ForceStringPutter,
        NullableEntityArrayPutter, NullableEntityPutter, NullableStringPutter,
        NullableValuePutter, PreinstancedPutter,
    },
    validators::{
        BoolValidator, EntityIdValidator, ForceStringValidator, IntConditionalValidator,
        NullableStringValidator, PreinstancedValidator,
    },
    Entity, FieldParser, FieldPutter, Identified, WireData,
};
use crate::preinstanced;
use crate::types::{
    id::{
        marker::{
            GuildMarker, SkuMarker, StickerBannerAssetMarker, StickerMarker, StickerPackMarker,
        },
        Id,
    },
    user::User,
};

preinstanced! {
    /// File format of a sticker.
    pub enum StickerFormat: u8 {
        /// PNG image.
        Png = 1,
        /// Animated PNG image.
        Apng = 2,
        /// Lottie animation.
        Lottie = 3,
        /// GIF image.
        Gif = 4,
    }
}

preinstanced! {
    /// Who provides a sticker.
    pub enum StickerType: u8 {
        /// Official sticker, part of a pack.
        Standard = 1,
        /// Uploaded to a guild.
        Guild = 2,
    }
}

// ---------------------------------------------------------------------------
// Sticker
// ---------------------------------------------------------------------------

const PARSE_ID: EntityIdParser<StickerMarker> = EntityIdParser::new("id");
const PUT_ID_INTO: EntityIdPutter<StickerMarker> = EntityIdPutter::new("id");
const PARSE_NAME: ForceStringParser = ForceStringParser::new("name");
const PUT_NAME_INTO: ForceStringPutter = ForceStringPutter::new("name");
const PARSE_DESCRIPTION: NullableStringParser = NullableStringParser::new("description");
const PUT_DESCRIPTION_INTO: NullableStringPutter = NullableStringPutter::new("description");
const PARSE_TAG: ForceStringParser = ForceStringParser::new("tags");
const PUT_TAG_INTO: ForceStringPutter = ForceStringPutter::new("tags");
const PARSE_FORMAT: PreinstancedParser<StickerFormat> =
    PreinstancedParser::new("format_type", StickerFormat::Png);
const PUT_FORMAT_INTO: PreinstancedPutter<StickerFormat> =
    PreinstancedPutter::new("format_type", StickerFormat::Png);
const PARSE_TYPE: PreinstancedParser<StickerType> =
    PreinstancedParser::new("type", StickerType::Guild);
const PUT_TYPE_INTO: PreinstancedPutter<StickerType> =
    PreinstancedPutter::new("type", StickerType::Guild);
const PARSE_PACK_ID: EntityIdParser<StickerPackMarker> = EntityIdParser::new("pack_id");
const PUT_PACK_ID_INTO: EntityIdOptionalPutter<StickerPackMarker> =
    EntityIdOptionalPutter::new("pack_id");
const PARSE_GUILD_ID: EntityIdParser<GuildMarker> = EntityIdParser::new("guild_id");
const PUT_GUILD_ID_INTO: EntityIdOptionalPutter<GuildMarker> =
    EntityIdOptionalPutter::new("guild_id");
const PARSE_AVAILABLE: BoolParser = BoolParser::new("available", true);
const PUT_AVAILABLE_INTO: BoolPutter = BoolPutter::new("available", true);
const PARSE_SORT_VALUE: NullableValueParser<u32> = NullableValueParser::new("sort_value");
const PUT_SORT_VALUE_INTO: NullableValuePutter<u32> = NullableValuePutter::new("sort_value");
const PARSE_USER: NullableEntityParser<User> = NullableEntityParser::new("user");
const PUT_USER_INTO: NullableEntityPutter<User> = NullableEntityPutter::new("user");

pub(crate) const VALIDATE_ID: EntityIdValidator<StickerMarker> =
    EntityIdValidator::new("id", Some(Sticker::NAME));
pub(crate) const VALIDATE_NAME: ForceStringValidator = ForceStringValidator::new("name", 2, 30);
pub(crate) const VALIDATE_DESCRIPTION: NullableStringValidator =
    NullableStringValidator::new("description", 2, 100);
pub(crate) const VALIDATE_TAG: ForceStringValidator = ForceStringValidator::new("tag", 1, 200);
pub(crate) const VALIDATE_FORMAT: PreinstancedValidator<StickerFormat> =
    PreinstancedValidator::new("format", StickerFormat::Png);
pub(crate) const VALIDATE_TYPE: PreinstancedValidator<StickerType> =
    PreinstancedValidator::new("type", StickerType::Guild);
pub(crate) const VALIDATE_PACK_ID: EntityIdValidator<StickerPackMarker> =
    EntityIdValidator::new("pack_id", Some(StickerPack::NAME));
pub(crate) const VALIDATE_GUILD_ID: EntityIdValidator<GuildMarker> =
    EntityIdValidator::new("guild_id", Some("Guild"));
pub(crate) const VALIDATE_AVAILABLE: BoolValidator = BoolValidator::new("available", true);
pub(crate) const VALIDATE_SORT_VALUE: IntConditionalValidator<u32> = IntConditionalValidator::new(
    "sort_value",
    0,
    |value| value >= 0 && value <= i128::from(u32::MAX),
    "must be a non-negative 32-bit integer, got {}",
);

/// A sticker that can be sent in messages.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Sticker {
    /// The sticker's ID.
    pub id: Id<StickerMarker>,
    /// Name of the sticker.
    pub name: String,
    /// Description of the sticker.
    pub description: Option<String>,
    /// Autocomplete tag, usually a unicode emoji name.
    pub tag: String,
    /// File format.
    pub format: StickerFormat,
    /// Whether the sticker is official or uploaded to a guild.
    pub kind: StickerType,
    /// Pack of standard stickers.
    pub pack_id: Id<StickerPackMarker>,
    /// Guild of guild stickers.
    pub guild_id: Id<GuildMarker>,
    /// Whether the sticker can be used, `false` when a guild lost boosts.
    pub available: bool,
    /// Position within the pack.
    pub sort_value: Option<u32>,
    /// Uploader of guild stickers.
    pub user: Option<User>,
}

impl Default for Sticker {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            name: String::new(),
            description: None,
            tag: String::new(),
            format: StickerFormat::Png,
            kind: StickerType::Guild,
            pack_id: Id::NONE,
            guild_id: Id::NONE,
            available: true,
            sort_value: None,
            user: None,
        }
    }
}

impl Entity for Sticker {
    const NAME: &'static str = "Sticker";
    const INCLUDES_INTERNALS: bool = true;

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_ID.parse(data),
            name: PARSE_NAME.parse(data),
            description: PARSE_DESCRIPTION.parse(data),
            tag: PARSE_TAG.parse(data),
            format: PARSE_FORMAT.parse(data),
            kind: PARSE_TYPE.parse(data),
            pack_id: PARSE_PACK_ID.parse(data),
            guild_id: PARSE_GUILD_ID.parse(data),
            available: PARSE_AVAILABLE.parse(data),
            sort_value: PARSE_SORT_VALUE.parse(data),
            user: PARSE_USER.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_NAME_INTO.put(&self.name, &mut data, defaults);
        PUT_DESCRIPTION_INTO.put(&self.description, &mut data, defaults);
        PUT_TAG_INTO.put(&self.tag, &mut data, defaults);
        PUT_FORMAT_INTO.put(&self.format, &mut data, defaults);
        PUT_TYPE_INTO.put(&self.kind, &mut data, defaults);
        PUT_PACK_ID_INTO.put(&self.pack_id, &mut data, defaults);
        PUT_AVAILABLE_INTO.put(&self.available, &mut data, defaults);
        PUT_SORT_VALUE_INTO.put(&self.sort_value, &mut data, defaults);

        if include_internals {
            PUT_GUILD_ID_INTO.put(&self.guild_id, &mut data, defaults);
            PUT_USER_INTO.put_with_internals(&self.user, &mut data, defaults, include_internals);
        }

        data
    }
}

impl Identified for Sticker {
    type Marker = StickerMarker;

    fn id(&self) -> Id<StickerMarker> {
        self.id
    }
}

// ---------------------------------------------------------------------------
// StickerPack
// ---------------------------------------------------------------------------

const PARSE_OWN_PACK_ID: EntityIdParser<StickerPackMarker> = EntityIdParser::new("id");
const PUT_OWN_PACK_ID_INTO: EntityIdPutter<StickerPackMarker> = EntityIdPutter::new("id");
const PARSE_PACK_NAME: ForceStringParser = ForceStringParser::new("name");
const PUT_PACK_NAME_INTO: ForceStringPutter = ForceStringPutter::new("name");
const PARSE_BANNER_ID: EntityIdParser<StickerBannerAssetMarker> =
    EntityIdParser::new("banner_asset_id");
const PUT_BANNER_ID_INTO: EntityIdOptionalPutter<StickerBannerAssetMarker> =
    EntityIdOptionalPutter::new("banner_asset_id");
const PARSE_COVER_STICKER_ID: EntityIdParser<StickerMarker> =
    EntityIdParser::new("cover_sticker_id");
const PUT_COVER_STICKER_ID_INTO: EntityIdOptionalPutter<StickerMarker> =
    EntityIdOptionalPutter::new("cover_sticker_id");
const PARSE_SKU_ID: EntityIdParser<SkuMarker> = EntityIdParser::new("sku_id");
const PUT_SKU_ID_INTO: EntityIdPutter<SkuMarker> = EntityIdPutter::new("sku_id");
const PARSE_STICKERS: NullableEntityArrayParser<Sticker> =
    NullableEntityArrayParser::new("stickers");
const PUT_STICKERS_INTO: NullableEntityArrayPutter<Sticker> =
    NullableEntityArrayPutter::new("stickers");

/// A pack of standard stickers.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StickerPack {
    /// The pack's ID.
    pub id: Id<StickerPackMarker>,
    /// Name of the pack.
    pub name: String,
    /// Description of the pack.
    pub description: Option<String>,
    /// Asset ID of the pack's banner.
    pub banner_id: Id<StickerBannerAssetMarker>,
    /// Sticker shown as the pack's icon.
    pub cover_sticker_id: Id<StickerMarker>,
    /// SKU the pack is sold as.
    pub sku_id: Id<SkuMarker>,
    /// Stickers of the pack, sorted by ID.
    pub stickers: Option<Vec<Sticker>>,
}

impl StickerPack {
    /// The pack's cover sticker, if it's part of [`stickers`](Self::stickers).
    pub fn cover_sticker(&self) -> Option<&Sticker> {
        self.stickers
            .iter()
            .flatten()
            .find(|sticker| sticker.id == self.cover_sticker_id)
    }
}

impl Entity for StickerPack {
    const NAME: &'static str = "StickerPack";
    const INCLUDES_INTERNALS: bool = true;

    fn from_data(data: &WireData) -> Self {
        Self {
            id: PARSE_OWN_PACK_ID.parse(data),
            name: PARSE_PACK_NAME.parse(data),
            description: PARSE_DESCRIPTION.parse(data),
            banner_id: PARSE_BANNER_ID.parse(data),
            cover_sticker_id: PARSE_COVER_STICKER_ID.parse(data),
            sku_id: PARSE_SKU_ID.parse(data),
            stickers: PARSE_STICKERS.parse(data),
        }
    }

    fn to_data_with(&self, defaults: bool, include_internals: bool) -> WireData {
        let mut data = WireData::new();
        PUT_OWN_PACK_ID_INTO.put(&self.id, &mut data, defaults);
        PUT_PACK_NAME_INTO.put(&self.name, &mut data, defaults);
        PUT_DESCRIPTION_INTO.put(&self.description, &mut data, defaults);
        PUT_BANNER_ID_INTO.put(&self.banner_id, &mut data, defaults);
        PUT_COVER_STICKER_ID_INTO.put(&self.cover_sticker_id, &mut data, defaults);
        PUT_SKU_ID_INTO.put(&self.sku_id, &mut data, defaults);
        PUT_STICKERS_INTO.put_with_internals(
            &self.stickers,
            &mut data,
            defaults,
            include_internals,
        );
        data
    }
}

impl Identified for StickerPack {
    type Marker = StickerPackMarker;

    fn id(&self) -> Id<StickerPackMarker> {
        self.id
    }
}

impl_entity_serde!(Sticker, StickerPack);
