use crate::opcode::Opcode;
use crate::operations::*;

/// A decoded opcode: its assembly mnemonic and the operation that executes it.
#[derive(Copy, Clone)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub execute: Operation,
}

impl Instruction {
    const fn new(mnemonic: &'static str, execute: Operation) -> Self {
        Instruction { mnemonic, execute }
    }
}

/// Selects the correct Instruction for a given Opcode
///
/// Anything outside the instruction table decodes to `None`; that includes the
/// `0nnn` machine-code calls, which have no meaning outside the original hardware.
pub fn from_op(op: Opcode) -> Option<Instruction> {
    let instruction = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Instruction::new("CLS", clr),
        (0x0, 0x0, 0xE, 0xE) => Instruction::new("RET", ret),
        (0x1, ..) => Instruction::new("JP", jump),
        (0x2, ..) => Instruction::new("CALL", call),
        (0x3, ..) => Instruction::new("SE", ske),
        (0x4, ..) => Instruction::new("SNE", skne),
        (0x5, .., 0x0) => Instruction::new("SE", skre),
        (0x6, ..) => Instruction::new("LD", load),
        (0x7, ..) => Instruction::new("ADD", add),
        (0x8, .., 0x0) => Instruction::new("LD", mv),
        (0x8, .., 0x1) => Instruction::new("OR", or),
        (0x8, .., 0x2) => Instruction::new("AND", and),
        (0x8, .., 0x3) => Instruction::new("XOR", xor),
        (0x8, .., 0x4) => Instruction::new("ADD", addr),
        (0x8, .., 0x5) => Instruction::new("SUB", sub),
        (0x8, .., 0x6) => Instruction::new("SHR", shr),
        (0x8, .., 0x7) => Instruction::new("SUBN", subn),
        (0x8, .., 0xE) => Instruction::new("SHL", shl),
        (0x9, .., 0x0) => Instruction::new("SNE", skrne),
        (0xA, ..) => Instruction::new("LD", loadi),
        (0xB, ..) => Instruction::new("JP", jumpv0),
        (0xC, ..) => Instruction::new("RND", rnd),
        (0xD, ..) => Instruction::new("DRW", draw),
        (0xE, _, 0x9, 0xE) => Instruction::new("SKP", skp),
        (0xE, _, 0xA, 0x1) => Instruction::new("SKNP", sknp),
        (0xF, _, 0x0, 0x7) => Instruction::new("LD", getdt),
        (0xF, _, 0x0, 0xA) => Instruction::new("LD", waitkey),
        (0xF, _, 0x1, 0x5) => Instruction::new("LD", setdt),
        (0xF, _, 0x1, 0x8) => Instruction::new("LD", setst),
        (0xF, _, 0x1, 0xE) => Instruction::new("ADD", addi),
        (0xF, _, 0x2, 0x9) => Instruction::new("LD", ldspr),
        (0xF, _, 0x3, 0x3) => Instruction::new("LD", bcd),
        (0xF, _, 0x5, 0x5) => Instruction::new("LD", stor),
        (0xF, _, 0x6, 0x5) => Instruction::new("LD", read),
        _ => return None,
    };
    Some(instruction)
}
