//! Bracket engine: generation, scoring, advancement, lifecycle gates.

mod advancement;
mod bracket;
mod lifecycle;
mod scoring;

pub use advancement::advance;
pub use bracket::generate_bracket;
pub use lifecycle::{launch, submit_score};
pub use scoring::{apply_score, ScoreOutcome};
