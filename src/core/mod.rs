//! Core building blocks: request resolution, the engine lifecycle and its
//! orchestrator, and the pure pieces of the extraction (window arithmetic,
//! area weights, polygon centroids).
pub mod engine;
pub mod geometry;
pub mod orchestrator;
pub mod request;
pub mod weights;
pub mod window;
