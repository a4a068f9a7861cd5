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

//! Tests for font validation.
use crate::tag::FontTag;

use super::*;

/// Builds a minimal, single-table (`head`-only) valid SFNT byte stream with
/// a correct table checksum and a correct `head.checkSumAdjustment`.
fn build_valid_font_bytes() -> Vec<u8> {
    let head_bytes: Vec<u8> = {
        // majorVersion, minorVersion, fontRevision, checksumAdjustment(0
        // initially), magicNumber, flags, unitsPerEm, created, modified,
        // xMin..yMax, macStyle, lowestRecPPEM, fontDirectionHint,
        // indexToLocFormat, glyphDataFormat, plus 2 reserved bytes.
        let mut b = Vec::new();
        b.extend_from_slice(&1u16.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes());
        b.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        b.extend_from_slice(&0u32.to_be_bytes()); // checksumAdjustment placeholder
        b.extend_from_slice(&0x5f0f_3cf5u32.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes());
        b.extend_from_slice(&1000u16.to_be_bytes());
        b.extend_from_slice(&0i64.to_be_bytes());
        b.extend_from_slice(&0i64.to_be_bytes());
        b.extend_from_slice(&0i16.to_be_bytes());
        b.extend_from_slice(&0i16.to_be_bytes());
        b.extend_from_slice(&0i16.to_be_bytes());
        b.extend_from_slice(&0i16.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes());
        b.extend_from_slice(&8u16.to_be_bytes());
        b.extend_from_slice(&2i16.to_be_bytes());
        b.extend_from_slice(&1i16.to_be_bytes());
        b.extend_from_slice(&0i16.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes()); // reserved pad
        b
    };
    assert_eq!(head_bytes.len(), 54);

    let header_size = 12;
    let entry_size = 16;
    let table_offset = header_size + entry_size;
    let table_checksum = utils::checksum(&head_bytes).0;

    let mut entry = Vec::new();
    entry.extend_from_slice(b"head");
    entry.extend_from_slice(&table_checksum.to_be_bytes());
    entry.extend_from_slice(&(table_offset as u32).to_be_bytes());
    entry.extend_from_slice(&(head_bytes.len() as u32).to_be_bytes());

    let mut sfnt_header = Vec::new();
    sfnt_header.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // TrueType
    sfnt_header.extend_from_slice(&1u16.to_be_bytes()); // numTables
    sfnt_header.extend_from_slice(&16u16.to_be_bytes()); // searchRange
    sfnt_header.extend_from_slice(&0u16.to_be_bytes()); // entrySelector
    sfnt_header.extend_from_slice(&0u16.to_be_bytes()); // rangeShift

    let mut whole_file = Vec::new();
    whole_file.extend_from_slice(&sfnt_header);
    whole_file.extend_from_slice(&entry);
    whole_file.extend_from_slice(&head_bytes);

    let header_checksum = utils::checksum(&sfnt_header).0;
    let entry_checksum = utils::checksum(&entry).0;
    let file_checksum_with_zero_adjustment =
        std::num::Wrapping(header_checksum)
            + std::num::Wrapping(entry_checksum)
            + std::num::Wrapping(table_checksum);
    let adjustment =
        (std::num::Wrapping(SFNT_EXPECTED_CHECKSUM) - file_checksum_with_zero_adjustment).0;

    let adjustment_offset = table_offset + 8;
    whole_file[adjustment_offset..adjustment_offset + 4]
        .copy_from_slice(&adjustment.to_be_bytes());

    whole_file
}

#[test]
fn test_validate_bytes_accepts_a_valid_font() {
    let bytes = build_valid_font_bytes();
    assert!(validate_bytes(&bytes).is_ok());
}

#[test]
fn test_validate_detects_table_checksum_mismatch() {
    let mut bytes = build_valid_font_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF; // corrupt a byte inside the 'head' table payload

    let result = validate_bytes(&bytes);
    assert!(matches!(
        result,
        Err(FontIoError::ValidationError(
            FontValidationError::ChecksumMismatch { tag, .. }
        )) if tag == FontTag::HEAD
    ));
}

#[test]
fn test_validate_detects_checksum_adjustment_mismatch() {
    let mut bytes = build_valid_font_bytes();
    let adjustment_offset = 12 + 16 + 8;
    bytes[adjustment_offset..adjustment_offset + 4].copy_from_slice(&0u32.to_be_bytes());
    // Recompute the table checksum so only checkSumAdjustment is wrong.
    let table_offset = 12 + 16;
    let table_len = bytes.len() - table_offset;
    let table_checksum = utils::checksum(&bytes[table_offset..table_offset + table_len]).0;
    // Directory entry layout is tag(4), checksum(4), offset(4), length(4);
    // the single entry starts right after the 12-byte sfnt header.
    bytes[16..20].copy_from_slice(&table_checksum.to_be_bytes());

    let result = validate_bytes(&bytes);
    assert!(matches!(
        result,
        Err(FontIoError::ValidationError(
            FontValidationError::HeadChecksumAdjustmentMismatch { .. }
        ))
    ));
}
