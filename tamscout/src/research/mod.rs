//! Keyword research core: phrase expansion, metric normalization,
//! opportunity scoring and the pipeline that runs them end to end.

mod classify;
mod normalize;
mod phrases;
mod pipeline;

pub use classify::OpportunityClassifier;
pub use normalize::MetricsNormalizer;
pub use phrases::PhraseGenerator;
pub use pipeline::ResearchPipeline;
