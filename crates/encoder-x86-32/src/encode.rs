// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::instruction::Instruction;

/* *
 *
 * Instruction Format (the subset used by the CIX-32 test catalog):
 * - legacy prefix: none
 * - Opcode: 1 byte, the register number is folded into the
 *   low 3 bits for the `+rd` forms (INC, DEC, PUSH, POP)
 * - ModRM, SIB, Displacement: none
 * - Immediate: 0, 1 (rel8) or 4 (imm32) bytes, little-endian
 *
 * References:
 *
 * - Intel Software Developer's Manual
 *   Volume 2, Chapter 2.1 INSTRUCTION FORMAT FOR PROTECTED MODE, REAL-ADDRESS MODE, AND VIRTUAL-8086 MODE
 *   Volume 2, Section 3.1.1.1 Opcode Column in the Instruction Summary Table (Instructions without VEX Prefix)
 *   https://www.intel.com/content/www/us/en/developer/articles/technical/intel-sdm.html
 *
 * - X86 Opcode and Instruction Reference
 *   http://ref.x86asm.net/coder32.html
 * - x86 and amd64 instruction reference
 *   https://www.felixcloutier.com/x86/
 *
 */
pub fn encode(instruction: &Instruction) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(instruction.length());
    encode_into(instruction, &mut bytes);
    bytes
}

/// Appends the encoded form of the instruction, opcode first.
pub fn encode_into(instruction: &Instruction, bytes: &mut Vec<u8>) {
    bytes.push(instruction.opcode());
    bytes.extend(instruction.operand_bytes());
}

/// Encodes the instructions in order, without any padding or alignment.
pub fn encode_sequence(instructions: &[Instruction]) -> Vec<u8> {
    let length = instructions.iter().map(|i| i.length()).sum();
    let mut bytes = Vec::with_capacity(length);
    for instruction in instructions {
        encode_into(instruction, &mut bytes);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::instruction::{Instruction, Register, StackRegister};

    use super::{encode, encode_sequence};

    #[test]
    fn test_encode_inc_dec() {
        // | Opcode | Instruction | Op/En | 64-Bit Mode | Compat/Leg Mode | Description          |
        // | ---    |  ---        |  ---  |  ---        |  ---            |  ---                 |
        // | 40+ rd | INC r32     | O     | N.E.        | Valid           | Increment doubleword |
        // | 48+ rd | DEC r32     | O     | N.E.        | Valid           | Decrement doubleword |
        //
        // note that in 64-bit mode 40..4F are REX prefixes,
        // the one-byte forms only exist in 32-bit mode.

        assert_eq!(encode(&Instruction::Inc(Register::EAX)), vec![0x40]);
        assert_eq!(encode(&Instruction::Inc(Register::ECX)), vec![0x41]);
        assert_eq!(encode(&Instruction::Inc(Register::EDX)), vec![0x42]);
        assert_eq!(encode(&Instruction::Inc(Register::EBX)), vec![0x43]);
        assert_eq!(encode(&Instruction::Dec(Register::EAX)), vec![0x48]);
        assert_eq!(encode(&Instruction::Dec(Register::ECX)), vec![0x49]);
        assert_eq!(encode(&Instruction::Dec(Register::EDX)), vec![0x4A]);
        assert_eq!(encode(&Instruction::Dec(Register::EBX)), vec![0x4B]);
    }

    #[test]
    fn test_encode_mov_imm32() {
        // | Opcode     | Instruction    | Op/En | Description      |
        // | ---        |  ---           |  ---  |  ---             |
        // | B8+ rd id  | MOV r32, imm32 | OI    | Move imm32 to r32 |

        assert_eq!(
            encode(&Instruction::MovEaxImm32(0x12345678)),
            vec![0xB8, 0x78, 0x56, 0x34, 0x12]
        );
        assert_eq!(
            encode(&Instruction::MovEaxImm32(1)),
            vec![0xB8, 0x01, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            encode(&Instruction::MovEaxImm32(i32::MAX as u32)),
            vec![0xB8, 0xFF, 0xFF, 0xFF, 0x7F]
        );
    }

    #[test]
    fn test_encode_stack() {
        assert_eq!(encode(&Instruction::Push(StackRegister::EAX)), vec![0x50]);
        assert_eq!(encode(&Instruction::Push(StackRegister::ECX)), vec![0x51]);
        assert_eq!(encode(&Instruction::Pop(StackRegister::EAX)), vec![0x58]);
        assert_eq!(encode(&Instruction::Pop(StackRegister::ECX)), vec![0x59]);
    }

    #[test]
    fn test_encode_jmp_rel8() {
        // | Opcode | Instruction | Op/En | Description                                  |
        // | ---    |  ---        |  ---  |  ---                                         |
        // | EB cb  | JMP rel8    | D     | Jump short, RIP = RIP + 8-bit displacement   |
        //
        // jmp $     -> eb fe
        // jmp $+3   -> eb 01 (skip one 1-byte instruction)

        assert_eq!(encode(&Instruction::JmpRel8(-2)), vec![0xEB, 0xFE]);
        assert_eq!(encode(&Instruction::JmpRel8(1)), vec![0xEB, 0x01]);
        assert_eq!(encode(&Instruction::JmpRel8(i8::MIN)), vec![0xEB, 0x80]);
        assert_eq!(encode(&Instruction::JmpRel8(i8::MAX)), vec![0xEB, 0x7F]);
    }

    #[test]
    fn test_encode_misc() {
        assert_eq!(encode(&Instruction::Hlt), vec![0xF4]);
        assert_eq!(encode(&Instruction::Nop), vec![0x90]);
    }

    #[test]
    fn test_encode_sequence() {
        let instructions = [
            Instruction::MovEaxImm32(1),
            Instruction::Dec(Register::EAX),
            Instruction::MovEaxImm32(0x7FFFFFFF),
            Instruction::Inc(Register::EAX),
            Instruction::Hlt,
        ];

        let bytes = encode_sequence(&instructions);
        assert_eq!(
            bytes,
            vec![
                0xB8, 0x01, 0x00, 0x00, 0x00, // mov eax, 1
                0x48, // dec eax
                0xB8, 0xFF, 0xFF, 0xFF, 0x7F, // mov eax, 0x7fffffff
                0x40, // inc eax
                0xF4, // hlt
            ]
        );

        let expected_length: usize = instructions.iter().map(|i| 1 + i.operand_length()).sum();
        assert_eq!(bytes.len(), expected_length);

        assert!(encode_sequence(&[]).is_empty());
    }
}
