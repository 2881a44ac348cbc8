//! Scan predicates and per-ticker evaluation
//!
//! The four predicates are pure free functions over an ordered bar slice:
//! they never mutate their input and derive everything they need locally.
//! [`evaluate`] runs all four for one ticker with the right window handed
//! to each.

mod evaluator;
mod price_surge;
mod types;
mod uptrend;
mod upward_gap;
mod volume_breakout;

pub use evaluator::{evaluate, TickerSignals};
pub use price_surge::price_surge;
pub use types::{GapHit, SurgeHit, UptrendHit, VolumeHit};
pub use uptrend::continuous_uptrend;
pub use upward_gap::upward_gap;
pub use volume_breakout::volume_breakout;
