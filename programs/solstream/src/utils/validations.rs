use crate::error::VestingError;

/// Validate the parameters for creating a stream.
pub fn check_create(
    total_amount: u64,
    start_time: i64,
    end_time: i64,
) -> Result<(), VestingError> {
    // Check: something is actually locked.
    if total_amount == 0 {
        return Err(VestingError::InvalidSchedule);
    }

    // Check: the schedule has a positive duration.
    if end_time <= start_time {
        return Err(VestingError::InvalidSchedule);
    }

    Ok(())
}
