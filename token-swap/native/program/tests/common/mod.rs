#![allow(dead_code)]

use num_traits::FromPrimitive;
use solana_program::program_pack::Pack;
use solana_program_test::{BanksClientError, ProgramTest, ProgramTestContext, processor};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, instruction::create_associated_token_account,
};
use spl_token_2022::{
    extension::StateWithExtensions,
    state::{Account as TokenAccount, Mint},
};
use token_swap::{
    address::{find_offer_address, find_vault_address},
    error::SwapError,
    processor::process_instruction,
};

pub const DECIMALS: u8 = 6;

/// One whole token at `DECIMALS`
pub const TOKEN_A: u64 = 1_000_000;
pub const TOKEN_B: u64 = 1_000_000;

const USER_LAMPORTS: u64 = 10_000_000_000;

pub fn program_test() -> ProgramTest {
    ProgramTest::new(
        "token_swap",
        token_swap::ID,
        processor!(process_instruction),
    )
}

/// Alice holds mint A and makes offers, Bob holds mint B and takes them.
/// Both mints live under `token_program`.
pub struct SwapTestEnv {
    pub context: ProgramTestContext,
    pub token_program: Pubkey,
    pub mint_authority: Keypair,
    pub alice: Keypair,
    pub bob: Keypair,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub alice_token_account_a: Pubkey,
    pub alice_token_account_b: Pubkey,
    pub bob_token_account_a: Pubkey,
    pub bob_token_account_b: Pubkey,
}

impl SwapTestEnv {
    pub fn offer_and_vault(&self, id: u64) -> (Pubkey, Pubkey) {
        let (offer, _) = find_offer_address(&self.alice.pubkey(), id, &token_swap::ID);
        (
            offer,
            find_vault_address(&offer, &self.token_mint_a, &self.token_program),
        )
    }

    pub fn holding_address(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, mint, &self.token_program)
    }
}

pub async fn setup_swap_test() -> SwapTestEnv {
    setup_swap_test_with(spl_token::ID).await
}

pub async fn setup_swap_test_with(token_program: Pubkey) -> SwapTestEnv {
    let mut context = program_test().start_with_context().await;

    let mint_authority = Keypair::new();
    let alice = Keypair::new();
    let bob = Keypair::new();
    fund_account(&mut context, &alice.pubkey(), USER_LAMPORTS).await;
    fund_account(&mut context, &bob.pubkey(), USER_LAMPORTS).await;

    let token_mint_a = create_mint(&mut context, &mint_authority, &token_program).await;
    let token_mint_b = create_mint(&mut context, &mint_authority, &token_program).await;

    let alice_token_account_a =
        create_ata(&mut context, &alice.pubkey(), &token_mint_a, &token_program).await;
    let alice_token_account_b =
        create_ata(&mut context, &alice.pubkey(), &token_mint_b, &token_program).await;
    let bob_token_account_a =
        create_ata(&mut context, &bob.pubkey(), &token_mint_a, &token_program).await;
    let bob_token_account_b =
        create_ata(&mut context, &bob.pubkey(), &token_mint_b, &token_program).await;

    mint_to(
        &mut context,
        &token_program,
        &token_mint_a,
        &alice_token_account_a,
        &mint_authority,
        10 * TOKEN_A,
    )
    .await;
    mint_to(
        &mut context,
        &token_program,
        &token_mint_b,
        &bob_token_account_b,
        &mint_authority,
        5 * TOKEN_B,
    )
    .await;

    SwapTestEnv {
        context,
        token_program,
        mint_authority,
        alice,
        bob,
        token_mint_a,
        token_mint_b,
        alice_token_account_a,
        alice_token_account_b,
        bob_token_account_a,
        bob_token_account_b,
    }
}

/// Random offer ids, so offers from one maker never collide.
pub fn generate_offer_id() -> u64 {
    let bytes = Keypair::new().pubkey().to_bytes();
    u64::from_le_bytes(bytes[..8].try_into().unwrap())
}

/// Sends `instructions` with the context payer covering fees.
pub async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context.banks_client.get_latest_blockhash().await.unwrap();
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        all_signers.as_slice(),
        blockhash,
    );
    context.banks_client.process_transaction(transaction).await
}

pub async fn fund_account(context: &mut ProgramTestContext, to: &Pubkey, lamports: u64) {
    let ix = solana_system_interface::instruction::transfer(&context.payer.pubkey(), to, lamports);
    send(context, &[ix], &[]).await.unwrap();
}

/// Creates a mint without extensions. Token-2022 accepts the base layout as is.
pub async fn create_mint(
    context: &mut ProgramTestContext,
    authority: &Keypair,
    token_program: &Pubkey,
) -> Pubkey {
    let mint = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();

    let instructions = [
        solana_system_interface::instruction::create_account(
            &context.payer.pubkey(),
            &mint.pubkey(),
            rent.minimum_balance(Mint::LEN),
            Mint::LEN as u64,
            token_program,
        ),
        spl_token_2022::instruction::initialize_mint(
            token_program,
            &mint.pubkey(),
            &authority.pubkey(),
            None,
            DECIMALS,
        )
        .unwrap(),
    ];
    send(context, &instructions, &[&mint]).await.unwrap();

    mint.pubkey()
}

pub async fn create_ata(
    context: &mut ProgramTestContext,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Pubkey {
    let ix = create_associated_token_account(&context.payer.pubkey(), owner, mint, token_program);
    send(context, &[ix], &[]).await.unwrap();
    get_associated_token_address_with_program_id(owner, mint, token_program)
}

pub async fn mint_to(
    context: &mut ProgramTestContext,
    token_program: &Pubkey,
    mint: &Pubkey,
    token_account: &Pubkey,
    authority: &Keypair,
    amount: u64,
) {
    let ix = spl_token_2022::instruction::mint_to(
        token_program,
        mint,
        token_account,
        &authority.pubkey(),
        &[],
        amount,
    )
    .unwrap();
    send(context, &[ix], &[authority]).await.unwrap();
}

pub async fn account_exists(context: &mut ProgramTestContext, address: &Pubkey) -> bool {
    context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .is_some()
}

pub async fn account_data(context: &mut ProgramTestContext, address: &Pubkey) -> Option<Vec<u8>> {
    context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .map(|account| account.data)
}

pub async fn lamports(context: &mut ProgramTestContext, address: &Pubkey) -> u64 {
    context.banks_client.get_balance(*address).await.unwrap()
}

pub async fn token_balance(context: &mut ProgramTestContext, token_account: &Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(*token_account)
        .await
        .unwrap()
        .expect("token account should exist");
    StateWithExtensions::<TokenAccount>::unpack(&account.data)
        .unwrap()
        .base
        .amount
}

pub fn assert_swap_error(result: Result<(), BanksClientError>, expected: SwapError) {
    let err = result.expect_err("transaction should have failed");
    match err {
        BanksClientError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(code),
        ))
        | BanksClientError::SimulationError {
            err: TransactionError::InstructionError(_, InstructionError::Custom(code)),
            ..
        } => assert_eq!(SwapError::from_u32(code), Some(expected)),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

/// For failures reported with a built-in `ProgramError` rather than a `SwapError`.
pub fn assert_instruction_error(result: Result<(), BanksClientError>, expected: InstructionError) {
    let err = result.expect_err("transaction should have failed");
    match err {
        BanksClientError::TransactionError(TransactionError::InstructionError(_, actual))
        | BanksClientError::SimulationError {
            err: TransactionError::InstructionError(_, actual),
            ..
        } => assert_eq!(actual, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}
