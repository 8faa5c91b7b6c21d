// Scoring — label normalization and ensemble aggregation.

pub mod ensemble;
pub mod normalize;
