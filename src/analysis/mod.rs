pub mod recommender;
pub mod scoring;
pub mod stats;
