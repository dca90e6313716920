// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::mnemonic::{
    OPCODE_DEC_BASE, OPCODE_HLT, OPCODE_INC_BASE, OPCODE_JMP_REL8, OPCODE_MOV_EAX_IMM32,
    OPCODE_NOP, OPCODE_POP_BASE, OPCODE_PUSH_BASE,
};

/// The general-purpose registers reachable by the one-byte
/// `INC`/`DEC` forms.
///
/// The discriminant is the register number that the short forms
/// add to their base opcode, i.e. `40+rd` and `48+rd`.
///
/// See:
/// - Volume 2, Section 3.1.1.1 Opcode Column in the Instruction Summary Table,
///   "+rb, +rw, +rd, +ro"
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Register {
    EAX = 0, // accumulator
    ECX = 1, // counter
    EDX = 2, // data
    EBX = 3, // base
}

/// Registers accepted by `PUSH`/`POP` in the CIX-32 test catalog.
///
/// The core only wires the accumulator and the counter to the stack unit,
/// so the wider x86 `50+rd`/`58+rd` range is not exposed here.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackRegister {
    EAX = 0,
    ECX = 1,
}

/// One machine instruction of the test catalog.
///
/// The set is closed: each variant maps to exactly one encoding and
/// the operand width is fixed by the variant, so a malformed instruction
/// (e.g. a 3-byte immediate) cannot be constructed.
///
/// | Opcode | Instruction    | Operands                  |
/// | ---    | ---            | ---                       |
/// | 40+rd  | INC r32        | -                         |
/// | 48+rd  | DEC r32        | -                         |
/// | B8     | MOV EAX, imm32 | imm32, little-endian      |
/// | 50+rd  | PUSH r32       | -                         |
/// | 58+rd  | POP r32        | -                         |
/// | EB cb  | JMP rel8       | rel8, relative to next IP |
/// | F4     | HLT            | -                         |
/// | 90     | NOP            | -                         |
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Instruction {
    Inc(Register),
    Dec(Register),
    MovEaxImm32(u32),
    Push(StackRegister),
    Pop(StackRegister),

    // the displacement is added to the address of the instruction
    // that follows the jump, i.e. `JMP +0` is a no-op.
    JmpRel8(i8),

    Hlt,
    Nop,
}

impl Instruction {
    pub fn opcode(&self) -> u8 {
        match self {
            Instruction::Inc(register) => OPCODE_INC_BASE + *register as u8,
            Instruction::Dec(register) => OPCODE_DEC_BASE + *register as u8,
            Instruction::MovEaxImm32(_) => OPCODE_MOV_EAX_IMM32,
            Instruction::Push(register) => OPCODE_PUSH_BASE + *register as u8,
            Instruction::Pop(register) => OPCODE_POP_BASE + *register as u8,
            Instruction::JmpRel8(_) => OPCODE_JMP_REL8,
            Instruction::Hlt => OPCODE_HLT,
            Instruction::Nop => OPCODE_NOP,
        }
    }

    /// The bytes following the opcode, in encoding order.
    pub fn operand_bytes(&self) -> Vec<u8> {
        match self {
            Instruction::MovEaxImm32(value) => value.to_le_bytes().to_vec(),
            Instruction::JmpRel8(displacement) => vec![*displacement as u8],
            _ => vec![],
        }
    }

    pub fn operand_length(&self) -> usize {
        match self {
            Instruction::MovEaxImm32(_) => 4,
            Instruction::JmpRel8(_) => 1,
            _ => 0,
        }
    }

    /// Encoded length in bytes, opcode included.
    pub fn length(&self) -> usize {
        1 + self.operand_length()
    }

    /// The catalog name of this instruction, the same text
    /// the memory image uses to annotate its opcode byte.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Inc(Register::EAX) => "INC EAX",
            Instruction::Inc(Register::ECX) => "INC ECX",
            Instruction::Inc(Register::EDX) => "INC EDX",
            Instruction::Inc(Register::EBX) => "INC EBX",
            Instruction::Dec(Register::EAX) => "DEC EAX",
            Instruction::Dec(Register::ECX) => "DEC ECX",
            Instruction::Dec(Register::EDX) => "DEC EDX",
            Instruction::Dec(Register::EBX) => "DEC EBX",
            Instruction::MovEaxImm32(_) => "MOV EAX,imm32",
            Instruction::Push(StackRegister::EAX) => "PUSH EAX",
            Instruction::Push(StackRegister::ECX) => "PUSH ECX",
            Instruction::Pop(StackRegister::EAX) => "POP EAX",
            Instruction::Pop(StackRegister::ECX) => "POP ECX",
            Instruction::JmpRel8(_) => "JMP rel8",
            Instruction::Hlt => "HLT",
            Instruction::Nop => "NOP",
        }
    }
}
