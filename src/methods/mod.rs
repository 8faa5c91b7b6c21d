// Method adapters — each produces a raw sentiment signal from text.
//
// Three methods, one trait. The lexicon and statistical methods are pure
// functions over embedded word tables; the transformer method wraps a
// loaded model in a degradation chain so it can never fail outright.

pub mod heuristic;
pub mod lexicon;
pub mod statistical;
pub mod traits;
pub mod transformer;
