//! Address derivation for offer records and vaults.
//!
//! Nothing here touches accounts: anyone holding the maker's key and the
//! offer id can recompute where an offer and its vault live.

use solana_program::pubkey::{Pubkey, PubkeyError};
use spl_associated_token_account::get_associated_token_address_with_program_id;

/// Domain tag prefixed to every offer address seed.
pub const OFFER_SEED: &[u8] = b"offer";

/// Finds the offer record address and its canonical bump for
/// `[OFFER_SEED, maker, id as u64 little-endian]`.
pub fn find_offer_address(maker: &Pubkey, id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OFFER_SEED, maker.as_ref(), &id.to_le_bytes()], program_id)
}

/// Re-derives an offer address from a bump stored in the record.
pub fn create_offer_address(
    maker: &Pubkey,
    id: u64,
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, PubkeyError> {
    Pubkey::create_program_address(
        &[OFFER_SEED, maker.as_ref(), &id.to_le_bytes(), &[bump]],
        program_id,
    )
}

/// Vault for an offer: the offer's associated token account for the offered
/// mint, under the token program that owns that mint.
pub fn find_vault_address(offer: &Pubkey, token_mint_a: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(offer, token_mint_a, token_program)
}

/// Holding account of `owner` for `mint`.
pub fn find_holding_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, token_program)
}
