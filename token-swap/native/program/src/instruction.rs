use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::address::{find_holding_address, find_offer_address, find_vault_address};

/// Instructions supported by the swap program
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum SwapInstruction {
    /// Open an offer: escrow `token_a_offered_amount` of mint A in a vault
    /// owned by the offer, asking `token_b_wanted_amount` of mint B.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Maker
    /// 1. `[]` Token mint A
    /// 2. `[]` Token mint B
    /// 3. `[writable]` Maker's ATA for mint A
    /// 4. `[writable]` Offer PDA `["offer", maker, id]`
    /// 5. `[writable]` Vault, the offer's ATA for mint A
    /// 6. `[]` System program
    /// 7. `[]` Token program, SPL Token or Token-2022, owning both mints
    /// 8. `[]` Associated Token Account program
    ///
    /// The vault address is public before the offer opens. If it already
    /// holds tokens the offer fails with `OfferAlreadyExists`, so ids should
    /// not be guessable.
    MakeOffer {
        id: u64,
        token_a_offered_amount: u64,
        token_b_wanted_amount: u64,
    },

    /// Fill an offer: pay the maker in mint B, receive the whole vault.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Taker
    /// 1. `[writable]` Maker
    /// 2. `[]` Token mint A
    /// 3. `[]` Token mint B
    /// 4. `[writable]` Taker's ATA for mint A, created if missing
    /// 5. `[writable]` Taker's ATA for mint B
    /// 6. `[writable]` Maker's ATA for mint B, created if missing
    /// 7. `[writable]` Offer PDA
    /// 8. `[writable]` Vault
    /// 9. `[]` System program
    /// 10. `[]` Token program owning both mints
    /// 11. `[]` Associated Token Account program
    TakeOffer,

    /// Withdraw an offer: return the vault to the maker.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Maker
    /// 1. `[]` Token mint A
    /// 2. `[writable]` Maker's ATA for mint A, created if missing
    /// 3. `[writable]` Offer PDA
    /// 4. `[writable]` Vault
    /// 5. `[]` System program
    /// 6. `[]` Token program owning mint A
    /// 7. `[]` Associated Token Account program
    CancelOffer,
}

#[allow(clippy::too_many_arguments)]
pub fn make_offer(
    program_id: &Pubkey,
    maker: &Pubkey,
    token_mint_a: &Pubkey,
    token_mint_b: &Pubkey,
    token_program: &Pubkey,
    id: u64,
    token_a_offered_amount: u64,
    token_b_wanted_amount: u64,
) -> Instruction {
    let (offer, _) = find_offer_address(maker, id, program_id);

    Instruction::new_with_borsh(
        *program_id,
        &SwapInstruction::MakeOffer {
            id,
            token_a_offered_amount,
            token_b_wanted_amount,
        },
        vec![
            AccountMeta::new(*maker, true),
            AccountMeta::new_readonly(*token_mint_a, false),
            AccountMeta::new_readonly(*token_mint_b, false),
            AccountMeta::new(find_holding_address(maker, token_mint_a, token_program), false),
            AccountMeta::new(offer, false),
            AccountMeta::new(find_vault_address(&offer, token_mint_a, token_program), false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
            AccountMeta::new_readonly(*token_program, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
    )
}

pub fn take_offer(
    program_id: &Pubkey,
    taker: &Pubkey,
    maker: &Pubkey,
    token_mint_a: &Pubkey,
    token_mint_b: &Pubkey,
    token_program: &Pubkey,
    id: u64,
) -> Instruction {
    let (offer, _) = find_offer_address(maker, id, program_id);

    Instruction::new_with_borsh(
        *program_id,
        &SwapInstruction::TakeOffer,
        vec![
            AccountMeta::new(*taker, true),
            AccountMeta::new(*maker, false),
            AccountMeta::new_readonly(*token_mint_a, false),
            AccountMeta::new_readonly(*token_mint_b, false),
            AccountMeta::new(find_holding_address(taker, token_mint_a, token_program), false),
            AccountMeta::new(find_holding_address(taker, token_mint_b, token_program), false),
            AccountMeta::new(find_holding_address(maker, token_mint_b, token_program), false),
            AccountMeta::new(offer, false),
            AccountMeta::new(find_vault_address(&offer, token_mint_a, token_program), false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
            AccountMeta::new_readonly(*token_program, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
    )
}

pub fn cancel_offer(
    program_id: &Pubkey,
    maker: &Pubkey,
    token_mint_a: &Pubkey,
    token_program: &Pubkey,
    id: u64,
) -> Instruction {
    let (offer, _) = find_offer_address(maker, id, program_id);

    Instruction::new_with_borsh(
        *program_id,
        &SwapInstruction::CancelOffer,
        vec![
            AccountMeta::new(*maker, true),
            AccountMeta::new_readonly(*token_mint_a, false),
            AccountMeta::new(find_holding_address(maker, token_mint_a, token_program), false),
            AccountMeta::new(offer, false),
            AccountMeta::new(find_vault_address(&offer, token_mint_a, token_program), false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
            AccountMeta::new_readonly(*token_program, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
        ],
    )
}
