use solana_program::{
    account_info::{AccountInfo, next_account_info},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

use super::shared::{
    check_holding_account, check_offer_accounts, check_program_accounts, check_signer,
    close_program_account,
    close_token_account, create_ata_if_missing, transfer_tokens, unpack_mint,
    unpack_token_account,
};
use crate::{
    address::{OFFER_SEED, find_holding_address},
    error::SwapError,
    state::Offer,
};

/// Accounts:
/// [signer, writable maker]
/// [readonly token_mint_a]
/// [writable maker_token_account_a]
/// [writable offer PDA]
/// [writable vault]
/// [readonly system program]
/// [readonly token program]
/// [readonly associated token program]
pub fn cancel_offer(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let maker = next_account_info(account_info_iter)?;
    let token_mint_a = next_account_info(account_info_iter)?;
    let maker_token_account_a = next_account_info(account_info_iter)?;
    let offer_info = next_account_info(account_info_iter)?;
    let vault = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;
    let associated_token_program = next_account_info(account_info_iter)?;

    // Basic checks
    check_signer(maker)?;
    let offer = Offer::load(offer_info, program_id)?;
    check_program_accounts(system_program, token_program, associated_token_program)?;

    // Authorization check: only the original maker can withdraw the offer
    if offer.maker != *maker.key {
        msg!("Unauthorized cancel attempt by {}", maker.key);
        return Err(SwapError::NotMaker.into());
    }
    check_offer_accounts(program_id, offer_info, &offer, token_mint_a, vault, token_program)?;
    let mint_a = unpack_mint(token_mint_a, token_program)?;

    if *maker_token_account_a.key
        != find_holding_address(maker.key, token_mint_a.key, token_program.key)
    {
        return Err(SwapError::InvalidTokenAccount.into());
    }
    check_holding_account(maker_token_account_a, token_mint_a.key, maker.key, token_program)?;
    let escrowed = unpack_token_account(vault, token_mint_a.key, offer_info.key, token_program)
        .map_err(|_| SwapError::InvalidVault)?
        .amount;

    create_ata_if_missing(
        maker,
        maker_token_account_a,
        maker,
        token_mint_a,
        system_program,
        token_program,
        associated_token_program,
    )?;

    let id_bytes = offer.id.to_le_bytes();
    let bump_seed = [offer.bump];
    let offer_seeds: &[&[u8]] = &[OFFER_SEED, offer.maker.as_ref(), &id_bytes, &bump_seed];

    msg!("Returning {} escrowed tokens to maker", escrowed);
    transfer_tokens(
        vault,
        maker_token_account_a,
        escrowed,
        token_mint_a,
        mint_a.decimals,
        offer_info,
        token_program,
        Some(offer_seeds),
    )?;

    msg!("Closing vault {}", vault.key);
    close_token_account(vault, maker, offer_info, token_program, offer_seeds)?;
    close_program_account(offer_info, maker)?;

    msg!("Offer {} cancelled", offer.id);
    Ok(())
}
