// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::path::{Path, PathBuf};

/// Failures while writing a memory image to disk.
///
/// All of them are fatal for the current invocation, nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("cannot create output directory {}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create temporary file in {}", .path.display())]
    TemporaryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write memory image {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot move memory image into place at {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImageError {
    pub fn path(&self) -> &Path {
        match self {
            ImageError::CreateDirectory { path, .. }
            | ImageError::TemporaryFile { path, .. }
            | ImageError::Write { path, .. }
            | ImageError::Persist { path, .. } => path,
        }
    }
}
