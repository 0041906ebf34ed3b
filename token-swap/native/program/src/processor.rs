use borsh::BorshDeserialize;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey,
};

use crate::{error::SwapError, instruction::SwapInstruction, instructions};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instr = SwapInstruction::try_from_slice(instruction_data)
        .map_err(|_| SwapError::InvalidInstruction)?;

    match instr {
        SwapInstruction::MakeOffer {
            id,
            token_a_offered_amount,
            token_b_wanted_amount,
        } => {
            msg!("Instruction: MakeOffer");
            instructions::make_offer(
                program_id,
                accounts,
                id,
                token_a_offered_amount,
                token_b_wanted_amount,
            )
        }
        SwapInstruction::TakeOffer => {
            msg!("Instruction: TakeOffer");
            instructions::take_offer(program_id, accounts)
        }
        SwapInstruction::CancelOffer => {
            msg!("Instruction: CancelOffer");
            instructions::cancel_offer(program_id, accounts)
        }
    }
}
