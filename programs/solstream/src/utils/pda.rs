//! Stream and vault address derivation.
//!
//! Any client can recompute these from the (sender, beneficiary, mint)
//! triple alone; there is no on-chain index of streams.

use anchor_lang::prelude::*;

use crate::constants::{VAULT_SEED, VESTING_SEED};

/// Address and bump of the stream for `(sender, beneficiary, mint)`.
pub fn find_vesting_address(
    sender: &Pubkey,
    beneficiary: &Pubkey,
    mint: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VESTING_SEED, sender.as_ref(), beneficiary.as_ref(), mint.as_ref()],
        &crate::ID,
    )
}

/// Address and bump of the custody vault backing `vesting`.
pub fn find_vault_address(vesting: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, vesting.as_ref()], &crate::ID)
}
