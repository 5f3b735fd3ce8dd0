/// Core value types shared by every stage of the pipeline.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
