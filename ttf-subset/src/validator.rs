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

//! Validates a parsed font against the byte stream it came from: every
//! table's recorded checksum must match its bytes, and the whole-file
//! checksum must match `head.checkSumAdjustment`.

use std::{
    fs,
    io::{Cursor, Read, Seek, SeekFrom},
    num::Wrapping,
    path::Path,
};

use byteorder::{BigEndian, WriteBytesExt};

use crate::{
    error::{FontIoError, FontValidationError},
    sfnt::{font::SfntFont, table::head::SFNT_EXPECTED_CHECKSUM},
    utils, Font, FontDataRead,
};

/// Validates every table's recorded checksum against its bytes, then the
/// font-wide `head.checkSumAdjustment`. Every mismatch is logged as it is
/// found; the first one encountered is returned as an error.
pub fn validate<T: Read + Seek + ?Sized>(
    font: &SfntFont,
    reader: &mut T,
) -> Result<(), FontIoError> {
    let mut first_error = None;

    for entry in font.directory().entries() {
        let mut bytes = vec![0u8; entry.length as usize];
        reader.seek(SeekFrom::Start(entry.offset as u64))?;
        reader.read_exact(&mut bytes)?;
        // head.checkSumAdjustment is calculated as 0 when the recorded
        // per-table checksum is derived, per the OpenType spec, and never
        // updated afterward; zero it here too before comparing.
        if entry.tag == crate::tag::FontTag::HEAD && bytes.len() >= 12 {
            bytes[8..12].fill(0);
        }
        let actual = utils::checksum(&bytes).0;
        if actual != entry.checksum {
            tracing::warn!(
                tag = %entry.tag,
                expected = format!("{:#010x}", entry.checksum),
                actual = format!("{actual:#010x}"),
                "table checksum mismatch"
            );
            first_error.get_or_insert(FontValidationError::ChecksumMismatch {
                tag: entry.tag,
                expected: entry.checksum,
                actual,
            });
        }
    }

    if let Some(error) = first_error {
        return Err(error.into());
    }

    let head_entry = font
        .directory()
        .entries()
        .iter()
        .find(|entry| entry.tag == crate::tag::FontTag::HEAD)
        .ok_or(FontIoError::MissingTable(crate::tag::FontTag::HEAD))?;

    reader.seek(SeekFrom::Start(0))?;
    let mut whole_file = Vec::new();
    reader.read_to_end(&mut whole_file)?;

    // head.checksumAdjustment lives 8 bytes into the 'head' table; zero it
    // out before recomputing the whole-file checksum, per the OpenType spec.
    let adjustment_offset = head_entry.offset as usize + 8;
    let recorded_adjustment = u32::from_be_bytes([
        whole_file[adjustment_offset],
        whole_file[adjustment_offset + 1],
        whole_file[adjustment_offset + 2],
        whole_file[adjustment_offset + 3],
    ]);
    let mut zeroed = Cursor::new(&mut whole_file[adjustment_offset..adjustment_offset + 4]);
    zeroed.write_u32::<BigEndian>(0)?;

    let file_checksum = utils::checksum(&whole_file);
    let expected_adjustment = (Wrapping(SFNT_EXPECTED_CHECKSUM) - file_checksum).0;

    if expected_adjustment != recorded_adjustment {
        tracing::warn!(
            expected = format!("{expected_adjustment:#010x}"),
            actual = format!("{recorded_adjustment:#010x}"),
            "head.checkSumAdjustment mismatch"
        );
        return Err(FontValidationError::HeadChecksumAdjustmentMismatch {
            expected: expected_adjustment,
            actual: recorded_adjustment,
        }
        .into());
    }

    tracing::debug!("font validated successfully");
    Ok(())
}

/// Parses `bytes` as an SFNT font and validates it.
pub fn validate_bytes(bytes: &[u8]) -> Result<(), FontIoError> {
    let mut reader = Cursor::new(bytes);
    let font = SfntFont::from_reader(&mut reader)?;
    validate(&font, &mut reader)
}

/// Reads and validates the SFNT font at `path`.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<(), FontIoError> {
    let bytes = fs::read(path)?;
    validate_bytes(&bytes)
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
