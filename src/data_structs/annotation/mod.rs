mod builder;
mod transcript_model;

pub use builder::AnnotationGraphBuilder;
pub use transcript_model::TranscriptModel;
