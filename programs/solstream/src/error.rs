use anchor_lang::prelude::*;

/// Custom error codes for the vesting stream program.
#[error_code]
pub enum VestingError {
    #[msg("Invalid schedule: total amount must be > 0 and end time after start time")]
    InvalidSchedule,

    #[msg("A stream already exists for this sender, beneficiary and mint")]
    StreamAlreadyExists,

    #[msg("Stream not found")]
    StreamNotFound,

    #[msg("Unauthorized: only the stream beneficiary may withdraw")]
    Unauthorized,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    #[msg("Sender balance is below the stream total")]
    InsufficientFunds,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Vault balance does not match the stream total after funding")]
    VaultBalanceMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
