use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::VAULT_SEED;
use crate::error::VestingError;
use crate::state::VestingAccount;
use crate::utils::time;

pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let stream_ai = ctx.accounts.vesting_account.to_account_info();
    let mut stream = load_stream(&stream_ai)?;

    let caller = ctx.accounts.beneficiary.key();
    if let Err(e) = authorize_withdrawal(
        &stream,
        &stream_ai.key(),
        &caller,
        &ctx.accounts.sender.key(),
        &ctx.accounts.mint.key(),
    ) {
        if matches!(e, VestingError::Unauthorized) {
            msg!(
                "Rejected withdrawal from stream {} by {} (beneficiary is {})",
                stream_ai.key(),
                caller,
                stream.beneficiary
            );
        }
        return Err(e.into());
    }

    let vault_balance = read_vault_balance(
        &ctx.accounts.vault.to_account_info(),
        &stream,
        &stream_ai.key(),
    )?;

    let now = time::current_time()?;
    let amount = stream.record_withdrawal(now)?;
    require!(
        vault_balance >= amount,
        VestingError::InsufficientVaultBalance
    );

    // CPI transfer from vault to beneficiary, signed by the stream PDA.
    let seeds = stream.signer_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: stream_ai.clone(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    {
        let mut data = stream_ai.try_borrow_mut_data()?;
        stream.try_serialize(&mut &mut data[..])?;
    }

    emit!(TokensWithdrawn {
        stream: stream_ai.key(),
        beneficiary: caller,
        amount,
        amount_withdrawn: stream.amount_withdrawn,
        remaining: stream.remaining_amount(),
    });

    Ok(())
}

/// Deserialize the stream behind `stream_ai`. Anything that is not an
/// initialized stream owned by this program is `StreamNotFound`.
fn load_stream(stream_ai: &AccountInfo) -> Result<VestingAccount> {
    require_keys_eq!(*stream_ai.owner, crate::ID, VestingError::StreamNotFound);
    require!(!stream_ai.data_is_empty(), VestingError::StreamNotFound);

    let data = stream_ai.try_borrow_data()?;
    let stream = VestingAccount::try_deserialize(&mut &data[..])
        .map_err(|_| error!(VestingError::StreamNotFound))?;
    require!(stream.is_initialized(), VestingError::StreamNotFound);
    Ok(stream)
}

/// The supplied address must be the stream of `(sender, stored beneficiary,
/// mint)`, and the caller must be that stored beneficiary.
///
/// The beneficiary is never taken from the caller's inputs, so presenting a
/// different beneficiary cannot redirect the lookup.
pub fn authorize_withdrawal(
    stream: &VestingAccount,
    stream_key: &Pubkey,
    caller: &Pubkey,
    sender: &Pubkey,
    mint: &Pubkey,
) -> std::result::Result<(), VestingError> {
    if stream.sender != *sender || stream.mint != *mint {
        return Err(VestingError::StreamNotFound);
    }
    let derived = Pubkey::create_program_address(&stream.signer_seeds(), &crate::ID)
        .map_err(|_| VestingError::StreamNotFound)?;
    if derived != *stream_key {
        return Err(VestingError::StreamNotFound);
    }

    if stream.beneficiary != *caller {
        return Err(VestingError::Unauthorized);
    }
    Ok(())
}

fn read_vault_balance(
    vault_ai: &AccountInfo,
    stream: &VestingAccount,
    stream_key: &Pubkey,
) -> Result<u64> {
    require_keys_eq!(
        *vault_ai.owner,
        token::ID,
        VestingError::InvalidTokenAccount
    );

    let data = vault_ai.try_borrow_data()?;
    let vault = TokenAccount::try_deserialize(&mut &data[..])?;
    require_keys_eq!(vault.mint, stream.mint, VestingError::InvalidTokenMint);
    require_keys_eq!(vault.owner, *stream_key, VestingError::InvalidTokenAccount);
    Ok(vault.amount)
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Must be the stream's stored beneficiary.
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    /// CHECK: Only used to re-derive the stream address; compared against
    /// stored state in-handler.
    pub sender: UncheckedAccount<'info>,

    pub mint: Account<'info, Mint>,

    /// CHECK: Loaded and validated in-handler so that a missing stream
    /// fails with `StreamNotFound`.
    #[account(mut)]
    pub vesting_account: UncheckedAccount<'info>,

    /// CHECK: Validated as an SPL Token account via unpacking in-handler.
    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_account.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::mint = mint,
        associated_token::authority = beneficiary,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensWithdrawn {
    pub stream: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub amount_withdrawn: u64,
    pub remaining: u64,
}
