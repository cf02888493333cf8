mod common;
mod matches;
mod referee;
mod tournament;
mod venue;

pub use common::*;
pub use matches::*;
pub use referee::*;
pub use tournament::*;
pub use venue::*;
