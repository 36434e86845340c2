pub mod reference;

pub use generator::{SampleFormat, SampleGenerator, SampleTags};
pub use reference::{MEDIA_ROOT, REFERENCE_TOML};
