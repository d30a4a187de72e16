/// Configuration, types, and shared structures for artiscii.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the artiscii workspace. It has no knowledge of image
/// decoding or rendering; those live in `ac-source` and `ac-pipeline`.

pub mod buffer;
pub mod charset;
pub mod config;
pub mod error;
pub mod history;
pub mod traits;

pub use buffer::PixelBuffer;
pub use charset::Ramp;
pub use config::{AsciiConfig, ColorMode, ImageFilter};
pub use error::CoreError;
pub use history::History;
