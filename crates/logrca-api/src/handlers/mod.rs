mod analyze;
mod rca;

pub use analyze::*;
pub use rca::*;
