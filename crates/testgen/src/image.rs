// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use cix_encoder::annotate;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{error::ImageError, program::Program};

/* *
 * Memory image format
 * -------------------
 *
 * A Verilog-flavoured initialization listing, one assignment per byte:
 *
 * ```text
 * // Generated test program for CIX-32
 * // Memory initialization file
 *
 * mem[  0] = 8'hB8;  // MOV EAX,imm32
 * mem[  1] = 8'h01;  // DATA(01)
 * mem[  2] = 8'h00;  // DATA(00)
 * ```
 *
 * - the index is right-aligned in a 3-character field
 * - the value is `8'h` followed by 2 uppercase hex digits
 * - the comment annotates the byte as if it were an opcode,
 *   so immediate and displacement bytes get misleading names,
 *   the testbench reviewers are used to it.
 */
pub const HEADER: &str = "// Generated test program for CIX-32\n// Memory initialization file\n\n";

pub fn render_line(address: usize, byte: u8) -> String {
    format!("mem[{:3}] = 8'h{:02X};  // {}\n", address, byte, annotate(byte))
}

pub fn render(program: &Program) -> String {
    // header + ~32 chars per line
    let mut text = String::with_capacity(HEADER.len() + program.len() * 32);
    text.push_str(HEADER);

    for (address, byte) in program.as_bytes().iter().enumerate() {
        text.push_str(&render_line(address, *byte));
    }

    debug!(bytes = program.len(), "memory image rendered");
    text
}

/// Renders the program and writes it to `path`, returns the
/// number of program bytes written.
///
/// The text goes to a temporary file next to the target first and is
/// then renamed over it, readers never see a half-written image.
/// Missing parent directories are created.
pub fn write_image(program: &Program, path: &Path) -> Result<usize, ImageError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&directory).map_err(|source| ImageError::CreateDirectory {
        path: directory.clone(),
        source,
    })?;

    let mut file =
        NamedTempFile::new_in(&directory).map_err(|source| ImageError::TemporaryFile {
            path: directory.clone(),
            source,
        })?;

    let text = render(program);
    file.write_all(text.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|source| ImageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    file.persist(path).map_err(|e| ImageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), bytes = program.len(), "memory image written");
    Ok(program.len())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::{program::Program, scenario::Scenario};

    use super::{HEADER, render, render_line, write_image};

    // (index, value) of every `mem[...]` line
    fn parse_image(text: &str) -> Vec<(usize, u8)> {
        text.lines()
            .filter(|line| line.starts_with("mem["))
            .map(|line| {
                let close = line.find(']').unwrap();
                let index = line[4..close].trim().parse::<usize>().unwrap();
                let hex_start = line.find("8'h").unwrap() + 3;
                let value = u8::from_str_radix(&line[hex_start..hex_start + 2], 16).unwrap();
                (index, value)
            })
            .collect()
    }

    #[test]
    fn test_render_flags() {
        let text = render(&Scenario::Flags.build());
        let expected = "\
// Generated test program for CIX-32
// Memory initialization file

mem[  0] = 8'hB8;  // MOV EAX,imm32
mem[  1] = 8'h01;  // DATA(01)
mem[  2] = 8'h00;  // DATA(00)
mem[  3] = 8'h00;  // DATA(00)
mem[  4] = 8'h00;  // DATA(00)
mem[  5] = 8'h48;  // DEC EAX
mem[  6] = 8'hB8;  // MOV EAX,imm32
mem[  7] = 8'hFF;  // DATA(FF)
mem[  8] = 8'hFF;  // DATA(FF)
mem[  9] = 8'hFF;  // DATA(FF)
mem[ 10] = 8'h7F;  // DATA(7F)
mem[ 11] = 8'h40;  // INC EAX
mem[ 12] = 8'hF4;  // HLT
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_context_free_annotation() {
        // the displacement byte 0x01 and an immediate byte 0x40
        // are annotated by their own value
        let program = Program::from_bytes(vec![0xEB, 0x01, 0xB8, 0x40, 0x00, 0x00, 0x00, 0xF4]);
        let text = render(&program);
        assert!(text.contains("mem[  1] = 8'h01;  // DATA(01)\n"));
        assert!(text.contains("mem[  3] = 8'h40;  // INC EAX\n"));
    }

    #[test]
    fn test_render_line() {
        assert_eq!(render_line(0, 0xF4), "mem[  0] = 8'hF4;  // HLT\n");
        assert_eq!(render_line(37, 0x0a), "mem[ 37] = 8'h0A;  // DATA(0A)\n");
        assert_eq!(render_line(1234, 0x90), "mem[1234] = 8'h90;  // NOP\n");
    }

    #[test]
    fn test_render_lines_match_program() {
        for scenario in Scenario::ALL {
            let program = scenario.build();
            let text = render(&program);

            assert!(text.starts_with(HEADER));
            assert!(text.ends_with('\n'));

            let entries = parse_image(&text);
            assert_eq!(entries.len(), program.len(), "{}", scenario);
            for (position, (index, value)) in entries.iter().enumerate() {
                assert_eq!(*index, position);
                assert_eq!(*value, program.as_bytes()[position]);
            }

            // header lines + blank separator + one line per byte
            assert_eq!(text.lines().count(), 3 + program.len());
        }
    }

    #[test]
    fn test_write_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sim").join("tb").join("test_branch.mem");

        let program = Scenario::Branch.build();
        let written = write_image(&program, &path).unwrap();
        assert_eq!(written, 6);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, render(&program));

        // overwrite in place, no leftovers in the directory
        write_image(&Scenario::Flags.build(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render(&Scenario::Flags.build()));
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_image_into_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let path = blocker.join("test_memory.mem");
        let error = write_image(&Scenario::Memory.build(), &path).unwrap_err();
        assert_eq!(error.path(), blocker.as_path());
    }
}
