//! Route/stop catalog model and its normalization.

pub mod normalize;
pub mod types;

pub use normalize::{Edge, NormalizedCatalog, normalize};
pub use types::{Location, OperatorSet, RawCatalog, Route, Stop, StopInfo};
