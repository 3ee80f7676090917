//! Job description scoring and resume content selection

pub mod impact;
pub mod keywords;
pub mod lexical;
pub mod metrics;
pub mod skills;
pub mod summary;
pub mod text_processor;

pub use text_processor::JobDescription;
