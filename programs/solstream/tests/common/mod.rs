//! Shared harness for the program tests.
//!
//! Token transfers only run inside the SBF VM, so these tests load the built
//! `solstream.so` instead of a native processor. Build it first with
//! `anchor build` (or `cargo build-sbf`); without it every test is skipped.

use std::path::Path;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::{self, get_associated_token_address};
use anchor_spl::token;
use anchor_spl::token::spl_token::state::{Account as TokenState, AccountState, Mint as MintState};
use solana_program_test::{BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::account::Account;
use solana_sdk::clock::Clock;
use solana_sdk::instruction::{Instruction, InstructionError};
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};
use solstream::state::VestingAccount;
use solstream::utils::pda::{find_vault_address, find_vesting_address};

pub const TOTAL: u64 = 1_000;
pub const START: i64 = 1_700_000_000;
pub const END: i64 = START + 3_600;
pub const CLIFF: u64 = 600;

const WALLET_LAMPORTS: u64 = 10_000_000_000;
const ACCOUNT_LAMPORTS: u64 = 1_000_000_000;

pub struct Harness {
    pub ctx: ProgramTestContext,
    pub sender: Keypair,
    pub beneficiary: Keypair,
    pub stranger: Keypair,
    pub mint: Pubkey,
    /// A second, unrelated mint.
    pub other_mint: Pubkey,
}

impl Harness {
    /// Start a bank where the sender holds `sender_balance` of `mint`.
    /// `None` leaves the sender without a token account at all.
    pub async fn start(sender_balance: Option<u64>) -> Option<Self> {
        let deploy_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy");
        if !deploy_dir.join("solstream.so").exists() {
            eprintln!("skipping: no solstream.so in {deploy_dir:?}, run `anchor build` first");
            return None;
        }
        std::env::set_var("SBF_OUT_DIR", &deploy_dir);

        let mut program_test = ProgramTest::new("solstream", solstream::ID, None);
        program_test.prefer_bpf(true);

        let sender = Keypair::new();
        let beneficiary = Keypair::new();
        let stranger = Keypair::new();
        let mint = Pubkey::new_unique();
        let other_mint = Pubkey::new_unique();

        for wallet in [&sender, &beneficiary, &stranger] {
            program_test.add_account(
                wallet.pubkey(),
                Account::new(WALLET_LAMPORTS, 0, &anchor_lang::system_program::ID),
            );
        }
        program_test.add_account(mint, mint_account());
        program_test.add_account(other_mint, mint_account());
        if let Some(amount) = sender_balance {
            program_test.add_account(
                get_associated_token_address(&sender.pubkey(), &mint),
                token_account(&mint, &sender.pubkey(), amount),
            );
        }

        let ctx = program_test.start_with_context().await;
        Some(Self { ctx, sender, beneficiary, stranger, mint, other_mint })
    }

    pub fn stream_address(&self) -> Pubkey {
        find_vesting_address(&self.sender.pubkey(), &self.beneficiary.pubkey(), &self.mint).0
    }

    pub fn vault_address(&self) -> Pubkey {
        find_vault_address(&self.stream_address()).0
    }

    pub fn sender_token_account(&self) -> Pubkey {
        get_associated_token_address(&self.sender.pubkey(), &self.mint)
    }

    pub fn beneficiary_token_account(&self) -> Pubkey {
        get_associated_token_address(&self.beneficiary.pubkey(), &self.mint)
    }

    pub fn create_ix(
        &self,
        total_amount: u64,
        start_time: i64,
        end_time: i64,
        cliff_duration: u64,
    ) -> Instruction {
        Instruction {
            program_id: solstream::ID,
            accounts: solstream::accounts::InitializeStream {
                vesting_account: self.stream_address(),
                vault: self.vault_address(),
                sender: self.sender.pubkey(),
                beneficiary: self.beneficiary.pubkey(),
                mint: self.mint,
                sender_token_account: self.sender_token_account(),
                token_program: token::ID,
                system_program: anchor_lang::system_program::ID,
                rent: anchor_lang::solana_program::rent::ID,
            }
            .to_account_metas(None),
            data: solstream::instruction::InitializeStream {
                total_amount,
                start_time,
                end_time,
                cliff_duration,
            }
            .data(),
        }
    }

    /// Withdraw from `stream` as `caller`, naming `sender` and `mint` as the
    /// caller believes them to be.
    pub fn withdraw_ix(
        &self,
        caller: &Pubkey,
        sender: &Pubkey,
        mint: &Pubkey,
        stream: &Pubkey,
    ) -> Instruction {
        Instruction {
            program_id: solstream::ID,
            accounts: solstream::accounts::Withdraw {
                beneficiary: *caller,
                sender: *sender,
                mint: *mint,
                vesting_account: *stream,
                vault: find_vault_address(stream).0,
                beneficiary_token_account: get_associated_token_address(caller, mint),
                token_program: token::ID,
                associated_token_program: associated_token::ID,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: solstream::instruction::Withdraw {}.data(),
        }
    }

    /// The beneficiary withdrawing from the harness stream.
    pub fn beneficiary_withdraw_ix(&self) -> Instruction {
        self.withdraw_ix(
            &self.beneficiary.pubkey(),
            &self.sender.pubkey(),
            &self.mint,
            &self.stream_address(),
        )
    }

    pub async fn set_time(&mut self, unix_timestamp: i64) {
        let clock = self.ctx.banks_client.get_sysvar::<Clock>().await.unwrap();
        self.ctx.set_sysvar(&Clock { unix_timestamp, ..clock });
    }

    pub async fn create(&mut self) -> Result<(), BanksClientError> {
        let ix = self.create_ix(TOTAL, START, END, CLIFF);
        process(&mut self.ctx, ix, &self.sender).await
    }

    pub async fn token_balance(&mut self, address: Pubkey) -> u64 {
        let account = self
            .ctx
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("token account missing");
        TokenState::unpack(&account.data).unwrap().amount
    }

    pub async fn account_data(&mut self, address: Pubkey) -> Option<Vec<u8>> {
        self.ctx
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .map(|account| account.data)
    }

    pub async fn load_stream(&mut self) -> VestingAccount {
        let address = self.stream_address();
        let data = self.account_data(address).await.expect("stream missing");
        VestingAccount::try_deserialize(&mut data.as_slice()).unwrap()
    }
}

/// Sign with `signer` as fee payer and process on a fresh blockhash, so
/// repeating an identical instruction is a new transaction.
pub async fn process(
    ctx: &mut ProgramTestContext,
    ix: Instruction,
    signer: &Keypair,
) -> Result<(), BanksClientError> {
    let blockhash = ctx.get_new_latest_blockhash().await.unwrap();
    let tx =
        Transaction::new_signed_with_payer(&[ix], Some(&signer.pubkey()), &[signer], blockhash);
    ctx.banks_client.process_transaction(tx).await
}

/// The custom error code a failed transaction ended with.
pub fn error_code(err: BanksClientError) -> u32 {
    let err = match err {
        BanksClientError::TransactionError(err)
        | BanksClientError::SimulationError { err, .. } => err,
        other => panic!("transaction was not executed: {other:?}"),
    };
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("expected a program error, got {other:?}"),
    }
}

fn mint_account() -> Account {
    let mut data = vec![0; MintState::LEN];
    let state = MintState {
        mint_authority: COption::None,
        supply: u64::MAX,
        decimals: 6,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    MintState::pack(state, &mut data).unwrap();
    Account {
        lamports: ACCOUNT_LAMPORTS,
        data,
        owner: token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let mut data = vec![0; TokenState::LEN];
    let state = TokenState {
        mint: *mint,
        owner: *owner,
        amount,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    TokenState::pack(state, &mut data).unwrap();
    Account {
        lamports: ACCOUNT_LAMPORTS,
        data,
        owner: token::ID,
        executable: false,
        rent_epoch: 0,
    }
}
