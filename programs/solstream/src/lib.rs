use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use crate::instructions::*;
use crate::state::StreamStatus;

declare_id!("C44y98NwZv9wbCZXYfY114tbYCgyZB2L5mEZ98ySAKdx");

#[program]
pub mod solstream {
    use super::*;

    /// Lock `total_amount` of `mint` for `beneficiary`, vesting linearly from
    /// `start_time` to `end_time` after a `cliff_duration` second cliff.
    pub fn initialize_stream(
        ctx: Context<InitializeStream>,
        total_amount: u64,
        start_time: i64,
        end_time: i64,
        cliff_duration: u64,
    ) -> Result<()> {
        instructions::initialize_stream::initialize_stream(
            ctx,
            total_amount,
            start_time,
            end_time,
            cliff_duration,
        )
    }

    /// Pay the beneficiary everything vested and not yet withdrawn.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::withdraw(ctx)
    }

    pub fn preview_vested(ctx: Context<StreamView>) -> Result<u64> {
        instructions::preview_vested::preview_vested(ctx)
    }

    pub fn status_of(ctx: Context<StreamView>) -> Result<StreamStatus> {
        instructions::status_of::status_of(ctx)
    }
}
