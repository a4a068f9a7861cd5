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

//! Tests for the 'name' SFNT table module.
use std::io::Cursor;

use super::*;

fn format0_bytes(strings: &[&[u8]]) -> Vec<u8> {
    let count = strings.len() as u16;
    let header_size = 6 + 12 * strings.len();
    let mut storage = Vec::new();
    let mut records = Vec::new();
    let mut offset = 0u16;
    for s in strings {
        records.push((offset, s.len() as u16));
        storage.extend_from_slice(s);
        offset += s.len() as u16;
    }

    let mut data = Vec::new();
    data.extend_from_slice(&0u16.to_be_bytes()); // format
    data.extend_from_slice(&count.to_be_bytes());
    data.extend_from_slice(&(header_size as u16).to_be_bytes());
    for (i, (rec_offset, len)) in records.iter().enumerate() {
        data.extend_from_slice(&1u16.to_be_bytes()); // platform_id
        data.extend_from_slice(&0u16.to_be_bytes()); // encoding_id
        data.extend_from_slice(&0u16.to_be_bytes()); // language_id
        data.extend_from_slice(&(i as u16).to_be_bytes()); // name_id
        data.extend_from_slice(&len.to_be_bytes());
        data.extend_from_slice(&rec_offset.to_be_bytes());
    }
    data.extend_from_slice(&storage);
    data
}

#[test]
fn test_from_reader_exact_format_0() {
    let data = format0_bytes(&[b"Test Font", b"Regular"]);
    let size = data.len();
    let mut reader = Cursor::new(data);
    let table = TableName::from_reader_exact(&mut reader, 0, size).unwrap();
    assert_eq!(table.format, 0);
    assert_eq!(table.name_records.len(), 2);
    assert!(table.lang_tag_records.is_empty());
    assert_eq!(&table.storage[0..9], b"Test Font");
}

#[test]
fn test_from_reader_exact_string_offset_past_end_is_rejected() {
    let mut data = vec![0u8; 6];
    data[4..6].copy_from_slice(&100u16.to_be_bytes());
    let mut reader = Cursor::new(data);
    let result = TableName::from_reader_exact(&mut reader, 0, 6);
    assert!(matches!(result, Err(FontIoError::InvalidFormat(_))));
}

#[test]
fn test_write_round_trips_format_0() {
    let table = TableName {
        format: 0,
        name_records: vec![NameRecord {
            platform_id: 3,
            encoding_id: 1,
            language_id: 0x409,
            name_id: 1,
            length: 4,
            offset: 0,
        }],
        lang_tag_records: Vec::new(),
        storage: b"Test".to_vec(),
    };
    let mut buf = Vec::new();
    table.write(&mut buf).unwrap();
    assert_eq!(buf.len(), table.len() as usize);

    let mut reader = Cursor::new(buf);
    let round_tripped = TableName::from_reader_exact(&mut reader, 0, table.len() as usize).unwrap();
    assert_eq!(round_tripped.name_records.len(), 1);
    assert_eq!(round_tripped.storage, b"Test");
}

#[test]
fn test_len_accounts_for_lang_tag_records_in_format_1() {
    let table = TableName {
        format: 1,
        name_records: Vec::new(),
        lang_tag_records: vec![LangTagRecord { length: 2, offset: 0 }],
        storage: vec![0u8; 2],
    };
    // header(6) + 0 name records + lang_tag count(2) + 1*4 + storage(2)
    assert_eq!(table.len(), 6 + 2 + 4 + 2);
}

#[test]
fn test_checksum_is_stable() {
    let table = TableName {
        format: 0,
        name_records: Vec::new(),
        lang_tag_records: Vec::new(),
        storage: Vec::new(),
    };
    assert_eq!(table.checksum(), table.checksum());
}
