use anchor_lang::prelude::*;

use crate::constants::VESTING_SEED;
use crate::error::VestingError;
use crate::utils::vesting_math;

/// One vesting stream, stored at the PDA derived from
/// `(sender, beneficiary, mint)`.
///
/// Field order is part of the account layout: clients filter on `sender`
/// and `beneficiary` by byte offset (see [`crate::state::layout`]).
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct VestingAccount {
    /// Funded the stream and signed its creation.
    pub sender: Pubkey,
    /// Sole identity allowed to withdraw.
    pub beneficiary: Pubkey,
    /// The only asset this stream moves.
    pub mint: Pubkey,
    /// Locked amount in base units. Always > 0 once stored.
    pub total_amount: u64,
    /// Paid out so far. Only the withdrawal path increases it.
    pub amount_withdrawn: u64,
    /// Unix seconds.
    pub start_time: i64,
    /// Unix seconds, strictly after `start_time`.
    pub end_time: i64,
    /// Seconds after `start_time` before anything vests.
    pub cliff_duration: u64,
    pub bump: u8,
}

/// Read-only classification of a stream at a point in time.
///
/// Every variant is the same on-chain state (active); this only describes
/// where the schedule currently is.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamStatus {
    /// Before the cliff.
    Pending,
    /// Vesting linearly.
    Streaming,
    /// Fully vested, balance still in the vault.
    Settled,
    /// Everything has been withdrawn.
    Depleted,
}

impl VestingAccount {
    /// A stored stream always locks a positive amount; a freshly allocated
    /// account is all zeroes.
    pub fn is_initialized(&self) -> bool {
        self.total_amount > 0
    }

    pub fn cliff_time(&self) -> i64 {
        vesting_math::cliff_time(self.start_time, self.cliff_duration)
    }

    pub fn vested_amount(&self, now: i64) -> u64 {
        vesting_math::vested_amount(
            self.total_amount,
            self.start_time,
            self.end_time,
            self.cliff_duration,
            now,
        )
    }

    pub fn claimable_amount(&self, now: i64) -> u64 {
        self.vested_amount(now).saturating_sub(self.amount_withdrawn)
    }

    /// What the vault must hold for this stream.
    pub fn remaining_amount(&self) -> u64 {
        self.total_amount.saturating_sub(self.amount_withdrawn)
    }

    pub fn status(&self, now: i64) -> StreamStatus {
        if self.amount_withdrawn >= self.total_amount {
            StreamStatus::Depleted
        } else if now < self.cliff_time() {
            StreamStatus::Pending
        } else if now >= self.end_time {
            StreamStatus::Settled
        } else {
            StreamStatus::Streaming
        }
    }

    /// Books everything claimable at `now` as withdrawn and returns the
    /// amount the vault must pay out.
    ///
    /// Fails with `NothingToWithdraw` (leaving the record untouched) before
    /// the cliff and whenever no new amount has vested since the last call.
    pub fn record_withdrawal(&mut self, now: i64) -> std::result::Result<u64, VestingError> {
        let claimable = self.claimable_amount(now);
        if claimable == 0 {
            return Err(VestingError::NothingToWithdraw);
        }

        self.amount_withdrawn = self
            .amount_withdrawn
            .checked_add(claimable)
            .ok_or(VestingError::MathOverflow)?;
        Ok(claimable)
    }

    /// Seeds for signing as the stream PDA, which is the vault's authority.
    pub fn signer_seeds(&self) -> [&[u8]; 5] {
        [
            VESTING_SEED,
            self.sender.as_ref(),
            self.beneficiary.as_ref(),
            self.mint.as_ref(),
            core::slice::from_ref(&self.bump),
        ]
    }
}
