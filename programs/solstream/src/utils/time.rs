//! Trusted time source.
//!
//! `now` always comes from the Clock sysvar. No instruction accepts a
//! caller-supplied timestamp for vesting decisions.

use anchor_lang::prelude::*;

/// Current cluster time in Unix seconds.
pub fn current_time() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}
