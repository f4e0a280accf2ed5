use anchor_lang::prelude::*;

use crate::instructions::StreamView;
use crate::state::StreamStatus;
use crate::utils::time;

pub fn status_of(ctx: Context<StreamView>) -> Result<StreamStatus> {
    let now = time::current_time()?;
    Ok(ctx.accounts.vesting_account.status(now))
}
