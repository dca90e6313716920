// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use cix_encoder::{Instruction, Register, StackRegister};
use tracing::debug;

use crate::program::{Program, ProgramBuilder};

/// The named directed tests for the CIX-32 testbench.
#[derive(Debug, PartialEq, Eq, Clone, Copy, clap::ValueEnum)]
pub enum Scenario {
    Arithmetic,
    Memory,
    Branch,
    Flags,

    // all of the above, in the order of `Scenario::BASIC`
    Comprehensive,
}

impl Scenario {
    /// The stand-alone scenarios, in emission and composition order.
    pub const BASIC: [Scenario; 4] = [
        Scenario::Arithmetic,
        Scenario::Memory,
        Scenario::Branch,
        Scenario::Flags,
    ];

    pub const ALL: [Scenario; 5] = [
        Scenario::Arithmetic,
        Scenario::Memory,
        Scenario::Branch,
        Scenario::Flags,
        Scenario::Comprehensive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Arithmetic => "arithmetic",
            Scenario::Memory => "memory",
            Scenario::Branch => "branch",
            Scenario::Flags => "flags",
            Scenario::Comprehensive => "comprehensive",
        }
    }

    /// The memory image file name the testbench loads, e.g. `test_branch.mem`.
    pub fn file_name(&self) -> String {
        format!("test_{}.mem", self.name())
    }

    /// The instruction sequence of a stand-alone scenario,
    /// `None` for the composite.
    pub fn builder(&self) -> Option<ProgramBuilder> {
        match self {
            Scenario::Arithmetic => Some(arithmetic()),
            Scenario::Memory => Some(memory()),
            Scenario::Branch => Some(branch()),
            Scenario::Flags => Some(flags()),
            Scenario::Comprehensive => None,
        }
    }

    pub fn build(&self) -> Program {
        let program = match self.builder() {
            Some(builder) => builder.build(),
            None => comprehensive(),
        };

        debug!(scenario = self.name(), bytes = program.len(), "scenario built");
        program
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// INC/DEC across registers, one immediate load and a PUSH/POP pair.
pub fn arithmetic() -> ProgramBuilder {
    let mut builder = ProgramBuilder::new();
    builder
        .push(Instruction::Inc(Register::EAX))
        .push(Instruction::Inc(Register::EAX))
        .push(Instruction::Dec(Register::EAX))
        .push(Instruction::MovEaxImm32(0x12345678))
        .push(Instruction::Inc(Register::ECX))
        .push(Instruction::Inc(Register::EDX))
        .push(Instruction::Push(StackRegister::EAX))
        .push(Instruction::Pop(StackRegister::EAX))
        .push(Instruction::Hlt);
    builder
}

/// Loads an address-like value, then only register and stack operations.
///
/// This is a placeholder: the catalog has no memory-addressed
/// instructions yet, so the scenario does not touch data memory.
pub fn memory() -> ProgramBuilder {
    let mut builder = ProgramBuilder::new();
    builder
        .push(Instruction::MovEaxImm32(0x1000))
        .push(Instruction::Inc(Register::EAX))
        .push(Instruction::Push(StackRegister::EAX))
        .push(Instruction::Pop(StackRegister::EAX))
        .push(Instruction::Hlt);
    builder
}

/// A forward `JMP rel8` over a `DEC EAX`, landing on `INC EAX`.
///
/// A correct core finishes with EAX = 2.
pub fn branch() -> ProgramBuilder {
    let mut builder = ProgramBuilder::new();
    builder
        .push(Instruction::Inc(Register::EAX))
        .jump_over(&[Instruction::Dec(Register::EAX)])
        .push(Instruction::Inc(Register::EAX)) // jump target
        .push(Instruction::Hlt);
    builder
}

/// 1 - 1 sets ZF, 0x7FFFFFFF + 1 sets OF.
pub fn flags() -> ProgramBuilder {
    let mut builder = ProgramBuilder::new();
    builder
        .push(Instruction::MovEaxImm32(1))
        .push(Instruction::Dec(Register::EAX))
        .push(Instruction::MovEaxImm32(i32::MAX as u32))
        .push(Instruction::Inc(Register::EAX))
        .push(Instruction::Hlt);
    builder
}

/// The basic scenarios run back to back, ending with a single `HLT`.
pub fn comprehensive() -> Program {
    let parts = Scenario::BASIC.map(|scenario| scenario.build());
    Program::compose(&parts)
}
