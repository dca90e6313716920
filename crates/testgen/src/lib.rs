// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Directed test vectors for the CIX-32 core testbench.
//
// scenario (instructions) -> program (bytes) -> image (annotated text) -> file

pub mod error;
pub mod image;
pub mod program;
pub mod scenario;

pub use error::ImageError;
pub use image::{render, write_image};
pub use program::{Program, ProgramBuilder};
pub use scenario::Scenario;

/// The directory the testbench loads its memory images from.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "sim/tb";
