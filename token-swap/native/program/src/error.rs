use num_derive::FromPrimitive;
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Errors returned by the swap program. The discriminant is the
/// `ProgramError::Custom` code, so variants are only ever appended.
#[derive(Clone, Copy, Debug, Error, FromPrimitive, PartialEq, Eq)]
pub enum SwapError {
    // Validation
    #[error("Invalid instruction")]
    InvalidInstruction,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Offered and wanted mints must be different")]
    SameTokenMints,

    #[error("Token mint does not match the offer")]
    MintMismatch,

    #[error("Maker account does not match the offer")]
    MakerMismatch,

    #[error("Offer account is not at its derived address")]
    InvalidOfferAccount,

    #[error("Vault is not the offer's associated token account")]
    InvalidVault,

    #[error("Token account has the wrong mint, owner or address")]
    InvalidTokenAccount,

    #[error("Overflow occurred")]
    AmountOverflow,

    // Authorization
    #[error("Missing required signer")]
    MissingSigner,

    #[error("Only the offer maker can cancel the offer")]
    NotMaker,

    // Not found
    #[error("Offer not found")]
    OfferNotFound,

    // Funds
    #[error("Insufficient token balance")]
    InsufficientFunds,

    // Collision
    #[error("An offer already exists at this address")]
    OfferAlreadyExists,
}

impl From<SwapError> for ProgramError {
    fn from(e: SwapError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
