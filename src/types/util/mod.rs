//! Coercion helpers shared by validators, parsers and models.

pub mod datetime;
pub mod image_hash;
pub mod snowflake;
pub mod url;

pub use self::{
    datetime::Timestamp,
    image_hash::ImageHash,
    snowflake::{maybe_snowflake, SnowflakeError},
    url::is_url,
};
