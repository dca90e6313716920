// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::borrow::Cow;

pub const OPCODE_INC_BASE: u8 = 0x40; // 40+rd
pub const OPCODE_DEC_BASE: u8 = 0x48; // 48+rd
pub const OPCODE_PUSH_BASE: u8 = 0x50; // 50+rd
pub const OPCODE_POP_BASE: u8 = 0x58; // 58+rd
pub const OPCODE_NOP: u8 = 0x90;
pub const OPCODE_MOV_EAX_IMM32: u8 = 0xB8; // B8+rd id, rd = EAX
pub const OPCODE_JMP_REL8: u8 = 0xEB; // EB cb
pub const OPCODE_HLT: u8 = 0xF4;

/* *
 * The opcode -> mnemonic table used for annotating memory images.
 *
 * The table is indexed by the byte value and built at compile time,
 * it is only consulted for comments, never for validating encodings.
 * Bytes without an entry are rendered as `DATA(XX)`.
 *
 * | Opcode | Mnemonic      |
 * | ---    | ---           |
 * | 40..43 | INC EAX..EBX  |
 * | 48..4B | DEC EAX..EBX  |
 * | 50, 51 | PUSH EAX, ECX |
 * | 58, 59 | POP EAX, ECX  |
 * | 90     | NOP           |
 * | B8     | MOV EAX,imm32 |
 * | EB     | JMP rel8      |
 * | F4     | HLT           |
 */
const MNEMONIC_TABLE: [Option<&str>; 256] = {
    let mut table: [Option<&str>; 256] = [None; 256];

    table[OPCODE_INC_BASE as usize] = Some("INC EAX");
    table[OPCODE_INC_BASE as usize + 1] = Some("INC ECX");
    table[OPCODE_INC_BASE as usize + 2] = Some("INC EDX");
    table[OPCODE_INC_BASE as usize + 3] = Some("INC EBX");

    table[OPCODE_DEC_BASE as usize] = Some("DEC EAX");
    table[OPCODE_DEC_BASE as usize + 1] = Some("DEC ECX");
    table[OPCODE_DEC_BASE as usize + 2] = Some("DEC EDX");
    table[OPCODE_DEC_BASE as usize + 3] = Some("DEC EBX");

    table[OPCODE_PUSH_BASE as usize] = Some("PUSH EAX");
    table[OPCODE_PUSH_BASE as usize + 1] = Some("PUSH ECX");
    table[OPCODE_POP_BASE as usize] = Some("POP EAX");
    table[OPCODE_POP_BASE as usize + 1] = Some("POP ECX");

    table[OPCODE_NOP as usize] = Some("NOP");
    table[OPCODE_HLT as usize] = Some("HLT");
    table[OPCODE_MOV_EAX_IMM32 as usize] = Some("MOV EAX,imm32");
    table[OPCODE_JMP_REL8 as usize] = Some("JMP rel8");

    table
};

/// Returns the mnemonic of the given opcode, or `None` if the byte
/// is not an opcode of the catalog.
pub fn lookup(opcode: u8) -> Option<&'static str> {
    MNEMONIC_TABLE[opcode as usize]
}

/// Annotates a single byte as if it were an opcode.
///
/// The lookup is context-free: an immediate or displacement byte
/// is annotated by its own value, so e.g. the `0x40` inside
/// `MOV EAX, 0x00000040` reads as `INC EAX`.
/// Unknown bytes fall back to `DATA(XX)`.
pub fn annotate(byte: u8) -> Cow<'static, str> {
    match lookup(byte) {
        Some(mnemonic) => Cow::Borrowed(mnemonic),
        None => Cow::Owned(format!("DATA({:02X})", byte)),
    }
}
