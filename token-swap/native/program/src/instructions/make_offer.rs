use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

use super::shared::{
    check_program_accounts, check_signer, create_ata_if_missing, create_pda_account,
    transfer_tokens, unpack_mint, unpack_token_account,
};
use crate::{
    address::{OFFER_SEED, find_holding_address, find_offer_address, find_vault_address},
    error::SwapError,
    state::Offer,
};

/// Accounts:
/// [signer, writable maker]
/// [readonly token_mint_a]
/// [readonly token_mint_b]
/// [writable maker_token_account_a]
/// [writable offer PDA]
/// [writable vault]
/// [readonly system program]
/// [readonly token program]
/// [readonly associated token program]
pub fn make_offer(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    id: u64,
    token_a_offered_amount: u64,
    token_b_wanted_amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let maker = next_account_info(account_info_iter)?;
    let token_mint_a = next_account_info(account_info_iter)?;
    let token_mint_b = next_account_info(account_info_iter)?;
    let maker_token_account_a = next_account_info(account_info_iter)?;
    let offer_info = next_account_info(account_info_iter)?;
    let vault = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;
    let associated_token_program = next_account_info(account_info_iter)?;

    // Basic checks
    if token_a_offered_amount == 0 || token_b_wanted_amount == 0 {
        return Err(SwapError::InvalidAmount.into());
    }
    check_signer(maker)?;
    check_program_accounts(system_program, token_program, associated_token_program)?;
    if token_mint_a.key == token_mint_b.key {
        return Err(SwapError::SameTokenMints.into());
    }
    let mint_a = unpack_mint(token_mint_a, token_program)?;
    unpack_mint(token_mint_b, token_program)?;

    // Maker must fund the offer from their own mint-A account
    if *maker_token_account_a.key
        != find_holding_address(maker.key, token_mint_a.key, token_program.key)
    {
        return Err(SwapError::InvalidTokenAccount.into());
    }
    let maker_holding =
        unpack_token_account(maker_token_account_a, token_mint_a.key, maker.key, token_program)?;
    if maker_holding.amount < token_a_offered_amount {
        msg!(
            "Maker holds {} but offers {}",
            maker_holding.amount,
            token_a_offered_amount
        );
        return Err(SwapError::InsufficientFunds.into());
    }

    // Derive the offer PDA and its vault
    let (offer_pda, offer_bump) = find_offer_address(maker.key, id, program_id);
    if offer_pda != *offer_info.key {
        msg!("Offer PDA mismatch");
        return Err(SwapError::InvalidOfferAccount.into());
    }
    if *vault.key != find_vault_address(&offer_pda, token_mint_a.key, token_program.key) {
        return Err(SwapError::InvalidVault.into());
    }
    if !offer_info.data_is_empty() || offer_info.owner == program_id {
        msg!("Offer {} already exists for {}", id, maker.key);
        return Err(SwapError::OfferAlreadyExists.into());
    }
    // Anyone can open the vault ATA early; only an empty one is reused
    if !vault.data_is_empty() {
        let leftover = unpack_token_account(vault, token_mint_a.key, &offer_pda, token_program)
            .map_err(|_| SwapError::InvalidVault)?;
        if leftover.amount != 0 {
            msg!("Vault {} already holds {} tokens", vault.key, leftover.amount);
            return Err(SwapError::OfferAlreadyExists.into());
        }
    }

    // Create the offer record, then its vault
    msg!("Creating offer account {}", offer_pda);
    let id_bytes = id.to_le_bytes();
    let bump_seed = [offer_bump];
    let offer_seeds: &[&[u8]] = &[OFFER_SEED, maker.key.as_ref(), &id_bytes, &bump_seed];
    create_pda_account(
        maker,
        offer_info,
        system_program,
        Offer::LEN,
        program_id,
        offer_seeds,
    )?;
    create_ata_if_missing(
        maker,
        vault,
        offer_info,
        token_mint_a,
        system_program,
        token_program,
        associated_token_program,
    )?;

    msg!("Transferring {} offered tokens to vault", token_a_offered_amount);
    transfer_tokens(
        maker_token_account_a,
        vault,
        token_a_offered_amount,
        token_mint_a,
        mint_a.decimals,
        maker,
        token_program,
        None,
    )?;

    Offer {
        is_initialized: true,
        id,
        maker: *maker.key,
        token_mint_a: *token_mint_a.key,
        token_mint_b: *token_mint_b.key,
        token_b_wanted_amount,
        bump: offer_bump,
    }
    .save(offer_info)?;

    msg!(
        "Offer {} open: {} of {} for {} of {}",
        id,
        token_a_offered_amount,
        token_mint_a.key,
        token_b_wanted_amount,
        token_mint_b.key
    );
    Ok(())
}
