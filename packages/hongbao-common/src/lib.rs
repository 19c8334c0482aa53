pub mod allocate;
pub mod date;
pub mod types;

pub use allocate::{allocate_amount, allocate_tier, AllocError, AllocationParams, RandomSource};
pub use types::{PrizeTier, TierAward};
