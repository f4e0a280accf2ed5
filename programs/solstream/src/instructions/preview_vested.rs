use anchor_lang::prelude::*;

use crate::constants::VESTING_SEED;
use crate::state::{StreamStatus, VestingAccount};
use crate::utils::time;

/// Vested amount at the current cluster time. Read-only; also emits a
/// `VestingQuote` so the full picture shows up in transaction logs.
pub fn preview_vested(ctx: Context<StreamView>) -> Result<u64> {
    let stream = &ctx.accounts.vesting_account;
    let now = time::current_time()?;
    let vested = stream.vested_amount(now);

    emit!(VestingQuote {
        stream: stream.key(),
        now,
        vested_amount: vested,
        amount_withdrawn: stream.amount_withdrawn,
        claimable: stream.claimable_amount(now),
        status: stream.status(now),
    });

    Ok(vested)
}

#[derive(Accounts)]
pub struct StreamView<'info> {
    #[account(
        seeds = [
            VESTING_SEED,
            vesting_account.sender.as_ref(),
            vesting_account.beneficiary.as_ref(),
            vesting_account.mint.as_ref(),
        ],
        bump = vesting_account.bump
    )]
    pub vesting_account: Account<'info, VestingAccount>,
}

#[event]
pub struct VestingQuote {
    pub stream: Pubkey,
    pub now: i64,
    pub vested_amount: u64,
    pub amount_withdrawn: u64,
    pub claimable: u64,
    pub status: StreamStatus,
}
