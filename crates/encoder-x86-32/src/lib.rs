// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/* *
 * The limitations of this encoder:
 * - Only support the CIX-32 test catalog, a handful of
 *   one-byte-opcode IA-32 instructions
 * - Only support 32-bit (protected) mode encodings,
 *   `40..4F` are INC/DEC here, not REX prefixes
 * - No ModRM/SIB, i.e. no memory operands
 * - No assembly text parsing, instructions are built as values
 */

pub mod encode;
pub mod instruction;
pub mod mnemonic;

pub use encode::{encode, encode_sequence};
pub use instruction::{Instruction, Register, StackRegister};
pub use mnemonic::{annotate, lookup};
