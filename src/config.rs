pub mod decode_options;
pub mod scheme_options;

pub use decode_options::{DecodeOptions, LeafStrategy};
pub use scheme_options::SchemeOptions;
