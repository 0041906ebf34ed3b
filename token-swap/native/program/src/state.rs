use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{account_info::AccountInfo, pubkey::Pubkey};

use crate::error::SwapError;

/// An open offer. Lives at the address from
/// [`find_offer_address`](crate::address::find_offer_address) and owns the vault.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub is_initialized: bool,
    pub id: u64,
    pub maker: Pubkey,
    /// Mint escrowed in the vault
    pub token_mint_a: Pubkey,
    /// Mint the maker wants in return
    pub token_mint_b: Pubkey,
    pub token_b_wanted_amount: u64,
    pub bump: u8,
}

impl Offer {
    // is_initialized + id + maker + mint a + mint b + wanted amount + bump
    pub const LEN: usize = 1 + 8 + 32 + 32 + 32 + 8 + 1;

    /// Reads a live offer owned by `program_id`. Anything else, including
    /// an address whose record was already closed, is `OfferNotFound`.
    pub fn load(account: &AccountInfo, program_id: &Pubkey) -> Result<Self, SwapError> {
        if account.owner != program_id || account.data_len() != Self::LEN {
            return Err(SwapError::OfferNotFound);
        }
        let offer = Self::try_from_slice(&account.data.borrow())
            .map_err(|_| SwapError::OfferNotFound)?;
        if !offer.is_initialized {
            return Err(SwapError::OfferNotFound);
        }
        Ok(offer)
    }

    pub fn save(&self, account: &AccountInfo) -> Result<(), SwapError> {
        self.serialize(&mut &mut account.data.borrow_mut()[..])
            .map_err(|_| SwapError::InvalidOfferAccount)
    }
}
