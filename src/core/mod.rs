pub mod formatter;
pub mod lookup;
pub mod normalizer;
pub mod pipeline;
