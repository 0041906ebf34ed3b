use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    sysvar::Sysvar,
};
use solana_system_interface::instruction as system_instruction;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token_2022::{
    extension::StateWithExtensions,
    instruction as token_instruction,
    state::{Account as TokenAccount, Mint},
};

use crate::{
    address::{create_offer_address, find_vault_address},
    error::SwapError,
    state::Offer,
};

pub fn check_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("{} did not sign", account.key);
        return Err(SwapError::MissingSigner.into());
    }
    Ok(())
}

/// System and ATA program accounts must be exactly the programs we CPI into.
/// The token program may be SPL Token or Token-2022.
pub fn check_program_accounts(
    system_program: &AccountInfo,
    token_program: &AccountInfo,
    associated_token_program: &AccountInfo,
) -> ProgramResult {
    if system_program.key != &solana_system_interface::program::ID
        || associated_token_program.key != &spl_associated_token_account::ID
    {
        return Err(ProgramError::IncorrectProgramId);
    }
    if token_program.key != &spl_token::ID && token_program.key != &spl_token_2022::ID {
        msg!("Unsupported token program {}", token_program.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Checks that a loaded offer sits at its own derived address and that
/// `vault` and `token_mint_a` are the ones it was opened with.
pub fn check_offer_accounts(
    program_id: &Pubkey,
    offer_info: &AccountInfo,
    offer: &Offer,
    token_mint_a: &AccountInfo,
    vault: &AccountInfo,
    token_program: &AccountInfo,
) -> ProgramResult {
    let expected = create_offer_address(&offer.maker, offer.id, offer.bump, program_id)
        .map_err(|_| SwapError::InvalidOfferAccount)?;
    if expected != *offer_info.key {
        msg!("Offer PDA mismatch");
        return Err(SwapError::InvalidOfferAccount.into());
    }
    if offer.token_mint_a != *token_mint_a.key {
        return Err(SwapError::MintMismatch.into());
    }
    if *vault.key != find_vault_address(offer_info.key, token_mint_a.key, token_program.key) {
        return Err(SwapError::InvalidVault.into());
    }
    Ok(())
}

/// Unpacks a mint owned by `token_program`. Token-2022 extensions are
/// skipped, only the base state is returned.
pub fn unpack_mint(mint: &AccountInfo, token_program: &AccountInfo) -> Result<Mint, ProgramError> {
    if mint.owner != token_program.key {
        msg!("Mint {} is not owned by {}", mint.key, token_program.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    let data = mint.data.borrow();
    Ok(StateWithExtensions::<Mint>::unpack(&data)?.base)
}

/// Unpacks a token account and checks it holds `mint` for `owner`.
pub fn unpack_token_account(
    account: &AccountInfo,
    mint: &Pubkey,
    owner: &Pubkey,
    token_program: &AccountInfo,
) -> Result<TokenAccount, ProgramError> {
    if account.owner != token_program.key {
        return Err(SwapError::InvalidTokenAccount.into());
    }
    let data = account.data.borrow();
    let token_account = StateWithExtensions::<TokenAccount>::unpack(&data)
        .map_err(|_| SwapError::InvalidTokenAccount)?
        .base;
    if token_account.mint != *mint || token_account.owner != *owner {
        return Err(SwapError::InvalidTokenAccount.into());
    }
    Ok(token_account)
}

/// A holding account that is about to be created if missing. When it
/// already exists it must still belong to `owner`, since classic SPL Token
/// lets an ATA's owner be reassigned.
pub fn check_holding_account(
    account: &AccountInfo,
    mint: &Pubkey,
    owner: &Pubkey,
    token_program: &AccountInfo,
) -> ProgramResult {
    if account.data_is_empty() {
        return Ok(());
    }
    unpack_token_account(account, mint, owner, token_program).map(|_| ())
}

/// Moves `amount` of `mint` between token accounts. When the source is
/// owned by a PDA, `owning_pda_seeds` carries its signer seeds and the
/// token program accepts the PDA as authority.
#[allow(clippy::too_many_arguments)]
pub fn transfer_tokens<'a>(
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    amount: u64,
    mint: &AccountInfo<'a>,
    decimals: u8,
    authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    owning_pda_seeds: Option<&[&[u8]]>,
) -> ProgramResult {
    let ix = token_instruction::transfer_checked(
        token_program.key,
        from.key,
        mint.key,
        to.key,
        authority.key,
        &[],
        amount,
        decimals,
    )?;
    let account_infos = [
        from.clone(),
        mint.clone(),
        to.clone(),
        authority.clone(),
        token_program.clone(),
    ];

    match owning_pda_seeds {
        Some(seeds) => invoke_signed(&ix, &account_infos, &[seeds]),
        None => invoke(&ix, &account_infos),
    }
}

/// Closes a PDA-owned token account, sending its rent to `destination`.
pub fn close_token_account<'a>(
    account: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    owning_pda_seeds: &[&[u8]],
) -> ProgramResult {
    let ix = token_instruction::close_account(
        token_program.key,
        account.key,
        destination.key,
        authority.key,
        &[],
    )?;
    invoke_signed(
        &ix,
        &[
            account.clone(),
            destination.clone(),
            authority.clone(),
            token_program.clone(),
        ],
        &[owning_pda_seeds],
    )
}

/// Creates `owner`'s associated token account for `mint` unless it already exists.
pub fn create_ata_if_missing<'a>(
    payer: &AccountInfo<'a>,
    ata: &AccountInfo<'a>,
    owner: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    associated_token_program: &AccountInfo<'a>,
) -> ProgramResult {
    if !ata.data_is_empty() {
        return Ok(());
    }
    msg!("Creating token account {} for {}", ata.key, owner.key);
    invoke(
        &create_associated_token_account_idempotent(
            payer.key,
            owner.key,
            mint.key,
            token_program.key,
        ),
        &[
            payer.clone(),
            ata.clone(),
            owner.clone(),
            mint.clone(),
            system_program.clone(),
            token_program.clone(),
            associated_token_program.clone(),
        ],
    )
}

/// Allocates a rent-exempt PDA of `space` bytes owned by `owner`.
///
/// `create_account` refuses targets that already hold lamports, and
/// anyone can send lamports to an address, so a pre-funded PDA is topped
/// up, allocated and assigned instead.
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let required = Rent::get()?.minimum_balance(space);
    let current = new_account.lamports();

    if current == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                new_account.key,
                required,
                space as u64,
                owner,
            ),
            &[payer.clone(), new_account.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    let shortfall = required.saturating_sub(current);
    if shortfall > 0 {
        invoke(
            &system_instruction::transfer(payer.key, new_account.key, shortfall),
            &[payer.clone(), new_account.clone(), system_program.clone()],
        )?;
    }
    invoke_signed(
        &system_instruction::allocate(new_account.key, space as u64),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(new_account.key, owner),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )
}

/// Closes an account owned by this program: its lamports go to
/// `destination` and it is handed back to the system program empty.
pub fn close_program_account(account: &AccountInfo, destination: &AccountInfo) -> ProgramResult {
    let reclaimed = account.lamports();
    **destination.lamports.borrow_mut() = destination
        .lamports()
        .checked_add(reclaimed)
        .ok_or(SwapError::AmountOverflow)?;
    **account.lamports.borrow_mut() = 0;

    account.resize(0)?;
    account.assign(&solana_system_interface::program::ID);
    Ok(())
}
