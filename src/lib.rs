// Undertone: multi-method sentiment analysis.
//
// This is the library root. Each module corresponds to a stage of the
// engine: method adapters produce raw sentiment signals, scoring normalizes
// and combines them, and the analyzer facade ties everything together.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod methods;
pub mod output;
pub mod preprocess;
pub mod scoring;
pub mod verdict;
