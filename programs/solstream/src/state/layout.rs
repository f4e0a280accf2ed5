//! Byte layout of a stored [`VestingAccount`] for clients that filter or
//! decode program accounts without Borsh (e.g. `getProgramAccounts` memcmp
//! on the beneficiary).

use core::mem::{offset_of, size_of};

use anchor_lang::prelude::*;
use anchor_lang::Discriminator;
use bytemuck::{Pod, Zeroable};

use crate::constants::DISCRIMINATOR_LEN;
use crate::state::VestingAccount;
use crate::utils::vesting_math;

/// Every stored field except the trailing bump, in Borsh order.
/// Integers are little-endian on the wire, same as the SBF target.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct RawVestingAccount {
    pub sender: [u8; 32],
    pub beneficiary: [u8; 32],
    pub mint: [u8; 32],
    pub total_amount: u64,
    pub amount_withdrawn: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub cliff_duration: u64,
}

pub const RAW_LEN: usize = size_of::<RawVestingAccount>();

pub const SENDER_OFFSET: usize = DISCRIMINATOR_LEN + offset_of!(RawVestingAccount, sender);
pub const BENEFICIARY_OFFSET: usize =
    DISCRIMINATOR_LEN + offset_of!(RawVestingAccount, beneficiary);
pub const MINT_OFFSET: usize = DISCRIMINATOR_LEN + offset_of!(RawVestingAccount, mint);
pub const BUMP_OFFSET: usize = DISCRIMINATOR_LEN + RAW_LEN;

// The raw view must cover the Borsh record exactly, minus the bump byte.
const _: () = assert!(RAW_LEN + 1 == VestingAccount::INIT_SPACE);

/// Decode raw account data. `None` for foreign or truncated accounts.
pub fn decode(data: &[u8]) -> Option<RawVestingAccount> {
    if data.get(..DISCRIMINATOR_LEN)? != VestingAccount::DISCRIMINATOR {
        return None;
    }
    let body = data.get(DISCRIMINATOR_LEN..DISCRIMINATOR_LEN + RAW_LEN)?;
    Some(bytemuck::pod_read_unaligned(body))
}

impl RawVestingAccount {
    pub fn sender(&self) -> Pubkey {
        Pubkey::new_from_array(self.sender)
    }

    pub fn beneficiary(&self) -> Pubkey {
        Pubkey::new_from_array(self.beneficiary)
    }

    pub fn mint(&self) -> Pubkey {
        Pubkey::new_from_array(self.mint)
    }

    /// Client-side preview; identical to the on-chain computation.
    pub fn vested_amount(&self, now: i64) -> u64 {
        vesting_math::vested_amount(
            self.total_amount,
            self.start_time,
            self.end_time,
            self.cliff_duration,
            now,
        )
    }
}
