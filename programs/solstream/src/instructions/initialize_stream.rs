use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_SEED};
use crate::error::VestingError;
use crate::state::VestingAccount;
use crate::utils::validations;

pub fn initialize_stream(
    ctx: Context<InitializeStream>,
    total_amount: u64,
    start_time: i64,
    end_time: i64,
    cliff_duration: u64,
) -> Result<()> {
    validations::check_create(total_amount, start_time, end_time)?;

    // The account is created on demand; a stored stream has a non-zero total.
    require!(
        !ctx.accounts.vesting_account.is_initialized(),
        VestingError::StreamAlreadyExists
    );

    check_sender_balance(
        &ctx.accounts.sender_token_account.to_account_info(),
        &ctx.accounts.sender.key(),
        &ctx.accounts.mint.key(),
        total_amount,
    )?;

    let stream = &mut ctx.accounts.vesting_account;
    stream.sender = ctx.accounts.sender.key();
    stream.beneficiary = ctx.accounts.beneficiary.key();
    stream.mint = ctx.accounts.mint.key();
    stream.total_amount = total_amount;
    stream.amount_withdrawn = 0;
    stream.start_time = start_time;
    stream.end_time = end_time;
    stream.cliff_duration = cliff_duration;
    stream.bump = ctx.bumps.vesting_account;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sender_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.sender.to_account_info(),
            },
        ),
        total_amount,
    )?;

    ctx.accounts.vault.reload()?;
    require!(
        ctx.accounts.vault.amount == total_amount,
        VestingError::VaultBalanceMismatch
    );

    emit!(StreamCreated {
        stream: ctx.accounts.vesting_account.key(),
        sender: ctx.accounts.sender.key(),
        beneficiary: ctx.accounts.beneficiary.key(),
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        total_amount,
        start_time,
        end_time,
        cliff_duration,
    });

    Ok(())
}

/// The sender must hold `total_amount` of `mint`. A token account that was
/// never created holds nothing.
fn check_sender_balance(
    token_account_ai: &AccountInfo,
    sender: &Pubkey,
    mint: &Pubkey,
    total_amount: u64,
) -> Result<()> {
    if token_account_ai.data_is_empty() {
        return err!(VestingError::InsufficientFunds);
    }
    require_keys_eq!(
        *token_account_ai.owner,
        token::ID,
        VestingError::InvalidTokenAccount
    );

    let data = token_account_ai.try_borrow_data()?;
    let token_account = TokenAccount::try_deserialize(&mut &data[..])?;
    require_keys_eq!(token_account.mint, *mint, VestingError::InvalidTokenMint);
    require_keys_eq!(
        token_account.owner,
        *sender,
        VestingError::InvalidTokenAccount
    );
    require!(
        token_account.amount >= total_amount,
        VestingError::InsufficientFunds
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeStream<'info> {
    #[account(
        init_if_needed,
        payer = sender,
        space = 8 + VestingAccount::INIT_SPACE,
        seeds = [
            VESTING_SEED,
            sender.key().as_ref(),
            beneficiary.key().as_ref(),
            mint.key().as_ref(),
        ],
        bump
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    /// Owned by the stream PDA, never by sender or beneficiary.
    #[account(
        init_if_needed,
        payer = sender,
        token::mint = mint,
        token::authority = vesting_account,
        seeds = [VAULT_SEED, vesting_account.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: Any identity may receive a stream; only its key is stored.
    pub beneficiary: UncheckedAccount<'info>,

    pub mint: Account<'info, Mint>,

    /// CHECK: Validated as an SPL Token account via unpacking in-handler,
    /// so a sender without one fails with `InsufficientFunds`.
    #[account(mut)]
    pub sender_token_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct StreamCreated {
    pub stream: Pubkey,
    pub sender: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub total_amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub cliff_duration: u64,
}
