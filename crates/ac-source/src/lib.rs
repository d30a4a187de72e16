/// Image decoding collaborator for artiscii.
///
/// Turns files or raw bytes into `PixelBuffer`s. Decode failures belong
/// here, not to the pipeline: they are surfaced before any conversion runs.

pub mod image;

pub use image::{ImageDecoder, load_image};
