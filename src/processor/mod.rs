pub mod field_normalizer;
pub mod pipeline;

pub use field_normalizer::*;
pub use pipeline::*;
