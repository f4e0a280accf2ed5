//! Linear-with-cliff vesting curve.
//!
//! The curve is evaluated from the immutable schedule every time; what has
//! already been withdrawn never feeds back into it.

/// First timestamp at which anything vests.
pub fn cliff_time(start_time: i64, cliff_duration: u64) -> i64 {
    start_time.saturating_add_unsigned(cliff_duration)
}

/// Cumulative amount unlocked at `now`.
///
/// - `now < start + cliff` => 0
/// - `now >= end` => `total_amount`
/// - otherwise `floor(total * (now - start) / (end - start))`
///
/// Integer math only and always rounded down, so the vault is never asked
/// for more than it holds. The truncated remainder is released by later
/// calls as `now` advances.
pub fn vested_amount(
    total_amount: u64,
    start_time: i64,
    end_time: i64,
    cliff_duration: u64,
    now: i64,
) -> u64 {
    if now < cliff_time(start_time, cliff_duration) {
        return 0;
    }
    if now >= end_time {
        return total_amount;
    }

    // Here start + cliff <= now < end, so the duration is positive.
    let elapsed = (now as i128 - start_time as i128).max(0) as u128;
    let duration = (end_time as i128 - start_time as i128) as u128;

    // u64 * (i64 span) always fits in u128.
    let vested = (total_amount as u128) * elapsed / duration;
    u64::try_from(vested).map_or(total_amount, |v| v.min(total_amount))
}
