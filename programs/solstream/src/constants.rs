//! Program-wide constants.

/// Namespace tag for stream addresses: `[VESTING_SEED, sender, beneficiary, mint]`.
pub const VESTING_SEED: &[u8] = b"vesting";

/// Namespace tag for custody vaults: `[VAULT_SEED, stream]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Anchor account discriminator length.
pub const DISCRIMINATOR_LEN: usize = 8;
