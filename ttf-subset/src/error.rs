// Copyright 2024-2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! Errors related to font I/O, validation, and subsetting.

use super::tag::FontTag;

/// Errors related to font I/O.
#[derive(Debug, thiserror::Error)]
pub enum FontIoError {
    /// An error occurred while reading or writing the font data.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Failed to write the font table data.
    #[error("Failed to write font table data")]
    FailedToWriteTableData(std::io::Error),
    /// A cross-table field was inconsistent with the data it describes.
    #[error("Invalid font data: {0}")]
    InvalidFormat(String),
    /// The magic number in the 'head' table is invalid.
    #[error("Invalid magic number in the 'head' table; expected 0x5f0f3cf5, got {0}")]
    InvalidHeadMagicNumber(u32),
    /// The specified size for reading a table directory entry record is
    /// invalid.
    #[error("Invalid size for a table directory entry record, expected {expected} bytes, got {got}")]
    InvalidSizeForDirectoryEntry {
        /// Expected size
        expected: usize,
        /// The actual size specified
        got: usize,
    },
    /// The specified size for reading a directory is not 4-byte aligned.
    #[error("Invalid size for a table directory entry record, expected a 4-byte aligned request, got {0}")]
    InvalidSizeForDirectory(usize),
    /// The specified size for reading a header is invalid.
    #[error("Invalid size for a header, expected 12 bytes, got {0}")]
    InvalidSizeForHeader(usize),
    /// The specified size for reading a tag is invalid.
    #[error("Invalid size for a tag, expected 4 bytes, got {0}")]
    InvalidSizeForTAG(usize),
    /// The font table is truncated.
    #[error("The font table is truncated: {0}")]
    LoadTableTruncated(FontTag),
    /// A required table was missing from the font.
    #[error("Required table is missing: {0}")]
    MissingTable(FontTag),
    /// A recognized table tag carried content this engine does not know how
    /// to interpret.
    #[error("Unsupported content in table: {0}")]
    UnsupportedTable(FontTag),
    /// Save errors.
    #[error("Error saving the font: {0}")]
    SaveError(#[from] FontSaveError),
    /// Subset errors.
    #[error("Error subsetting the font: {0}")]
    SubsetError(#[from] FontSubsetError),
    /// Validation errors.
    #[error("Error validating the font: {0}")]
    ValidationError(#[from] FontValidationError),
    /// An error occurred while generating a string from UTF-8 bytes.
    #[error("Error occurred while generating a string from UTF-8 bytes: {0}")]
    StringFromUtf8(#[from] std::string::FromUtf8Error),
    /// When determining the type of font, the magic number was not recognized.
    #[error("An unknown magic number was encountered: {0}")]
    UnknownMagic(u32),
}

/// Errors related to saving a font.
#[derive(Debug, thiserror::Error)]
pub enum FontSaveError {
    /// The font has no tables.
    #[error("No tables were found in the font.")]
    NoTablesFound,
}

/// Errors related to validating a font against the byte stream it was
/// parsed from.
#[derive(Debug, thiserror::Error)]
pub enum FontValidationError {
    /// A table's content did not match its recorded checksum.
    #[error("Checksum mismatch for table {tag}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// The table whose checksum did not match.
        tag: FontTag,
        /// The checksum recorded in the table directory.
        expected: u32,
        /// The checksum recomputed from the table's bytes.
        actual: u32,
    },
    /// The font-wide `head.checkSumAdjustment` value did not match the
    /// recomputed whole-file checksum.
    #[error("head.checkSumAdjustment mismatch: expected {expected:#010x}, got {actual:#010x}")]
    HeadChecksumAdjustmentMismatch {
        /// The expected adjustment, derived from the whole-file checksum.
        expected: u32,
        /// The adjustment actually recorded in the 'head' table.
        actual: u32,
    },
}

/// Errors related to subsetting a font.
#[derive(Debug, thiserror::Error)]
pub enum FontSubsetError {
    /// One of the requested runes could not be resolved to a glyph index in
    /// any of the preferred cmap subtables.
    #[error("Rune U+{0:04X} could not be resolved to a glyph index")]
    RuneNotFound(u32),
    /// The requested subset operation would not change the font (or would
    /// grow it), so performing it is redundant.
    #[error("Requested subset is redundant: {0}")]
    Redundant(String),
    /// A glyph index named in the subset request does not exist in the font.
    #[error("Glyph index {0} is out of range")]
    GlyphIndexOutOfRange(u32),
}
