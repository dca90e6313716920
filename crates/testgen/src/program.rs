// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use cix_encoder::{encode_sequence, mnemonic::OPCODE_HLT, Instruction};

/// The flat byte image of one test program, in execution order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn ends_with_halt(&self) -> bool {
        self.bytes.last() == Some(&OPCODE_HLT)
    }

    /// The program bytes without the trailing `HLT`.
    ///
    /// Panics if the program does not end with `HLT`, composing such
    /// a program would silently drop a real instruction byte.
    pub fn body(&self) -> &[u8] {
        assert!(
            self.ends_with_halt(),
            "program does not end with HLT, can not strip it"
        );
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Joins the programs in the given order into one program.
    ///
    /// The trailing `HLT` of every part is removed and a single `HLT`
    /// is appended at the end, so execution falls through from one
    /// part into the next.
    pub fn compose(parts: &[Program]) -> Program {
        let length = parts.iter().map(|p| p.len().saturating_sub(1)).sum::<usize>() + 1;
        let mut bytes = Vec::with_capacity(length);
        for part in parts {
            bytes.extend_from_slice(part.body());
        }
        bytes.push(OPCODE_HLT);
        Program { bytes }
    }
}

/// Collects instructions in program order and encodes them
/// into a `Program`.
#[derive(Debug, Default, Clone)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn extend(&mut self, instructions: &[Instruction]) -> &mut Self {
        self.instructions.extend_from_slice(instructions);
        self
    }

    /// Emits `JMP rel8` followed by the skipped instructions.
    ///
    /// The displacement is the encoded length of `skipped`, so the jump
    /// always lands on whatever is pushed next, no matter how the skipped
    /// sequence is edited.
    pub fn jump_over(&mut self, skipped: &[Instruction]) -> &mut Self {
        let span: usize = skipped.iter().map(|i| i.length()).sum();
        assert!(
            span <= i8::MAX as usize,
            "skipped span of {} bytes is out of the rel8 range",
            span
        );

        self.instructions.push(Instruction::JmpRel8(span as i8));
        self.instructions.extend_from_slice(skipped);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Address (offset from the program start) of the instruction
    /// at the given index.
    pub fn address_of(&self, index: usize) -> usize {
        self.instructions[..index].iter().map(|i| i.length()).sum()
    }

    pub fn build(&self) -> Program {
        assert!(!self.instructions.is_empty(), "empty program");

        let bytes = encode_sequence(&self.instructions);
        let expected_length: usize = self
            .instructions
            .iter()
            .map(|i| 1 + i.operand_length())
            .sum();
        assert_eq!(bytes.len(), expected_length);

        Program { bytes }
    }
}
