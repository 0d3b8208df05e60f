//! Media engines driving the external transcoder

pub mod burn;
pub mod extraction;

pub use burn::SubtitleBurnEngine;
pub use extraction::ClipExtractionEngine;
