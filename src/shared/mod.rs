pub mod geo;
pub mod normalize;
pub(crate) mod stats;

pub use geo::*;
pub use normalize::*;
