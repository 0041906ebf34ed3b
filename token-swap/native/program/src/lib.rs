pub mod address;
pub mod error;
pub mod instruction;
pub mod instructions;
pub mod processor;
pub mod state;

solana_program::declare_id!("4ws3cC8wmamtdWNzUeefgPfr1HH3d8TA2XrztKbBxkJF");

#[cfg(not(feature = "no-entrypoint"))]
use crate::processor::process_instruction;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
