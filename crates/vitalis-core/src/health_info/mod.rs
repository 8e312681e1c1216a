//! Educational health content.

pub mod markdown;
pub mod model;

pub use markdown::{Block, Inline, convert, plain_text, render_html};
pub use model::{
    DEFAULT_DISCLAIMER, HealthInfo, HealthInfoSection, PREDEFINED_TOPICS, decode_health_info,
};
