mod dataset;
mod map;
mod record;

pub use dataset::*;
pub use map::*;
pub use record::*;
