pub mod pda;
pub mod time;
pub mod validations;
pub mod vesting_math;
