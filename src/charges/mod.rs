//! Charge values and the descriptors that discretize continuous distributions into them.

mod charge;
mod distribution;
mod line;

pub use charge::Charge;
pub use distribution::{discretize_all, Distribution};
pub use line::InfiniteLineCharge;
