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

//! Tests for the 'cmap' SFNT table module.
use std::io::Cursor;

use super::*;

#[test]
fn test_format0_runes_and_cmap_cover_all_256_codes() {
    let mut glyph_id_array = [0u8; 256];
    glyph_id_array[65] = 5; // 'A' -> glyph 5
    let table = CmapFormat0 { glyph_id_array };
    assert_eq!(table.runes().len(), 256);
    assert_eq!(table.cmap().get(&65), Some(&5));
}

#[test]
fn test_format0_rebuild_for_prefix_zeroes_dropped_glyphs() {
    let mut glyph_id_array = [0u8; 256];
    glyph_id_array[10] = 20;
    glyph_id_array[11] = 3;
    let table = CmapFormat0 { glyph_id_array };
    let rebuilt = table.rebuild_for_prefix(10);
    assert_eq!(rebuilt.glyph_id_array[10], 0);
    assert_eq!(rebuilt.glyph_id_array[11], 3);
}

#[test]
fn test_format4_write_then_read_round_trips() {
    let table = CmapFormat4 {
        start_code: vec![65, 0xFFFF],
        end_code: vec![90, 0xFFFF],
        id_delta: vec![0, 1],
        id_range_offset: vec![0, 0],
        glyph_id_array: Vec::new(),
    };
    let mut buf = Vec::new();
    table.write(&mut buf).unwrap();

    let mut reader = Cursor::new(buf);
    // consume the format field the same way CmapSubtable::from_reader does
    let format = reader.read_u16::<BigEndian>().unwrap();
    assert_eq!(format, 4);
    let round_tripped = CmapFormat4::from_reader(&mut reader).unwrap();
    assert_eq!(round_tripped.start_code, vec![65, 0xFFFF]);
    assert_eq!(round_tripped.end_code, vec![90, 0xFFFF]);
}

#[test]
fn test_format4_map_char_uses_id_delta_when_no_range_offset() {
    let table = CmapFormat4 {
        start_code: vec![65, 0xFFFF],
        end_code: vec![90, 0xFFFF],
        id_delta: vec![5, 1],
        id_range_offset: vec![0, 0],
        glyph_id_array: Vec::new(),
    };
    assert_eq!(table.map_char(65), Some(70));
    assert_eq!(table.map_char(200), None);
}

#[test]
fn test_format4_rebuild_for_prefix_merges_contiguous_runs() {
    let table = CmapFormat4 {
        start_code: vec![10, 0xFFFF],
        end_code: vec![14, 0xFFFF],
        id_delta: vec![0, 1],
        id_range_offset: vec![0, 0],
        glyph_id_array: Vec::new(),
    };
    // glyphs equal to rune here (id_delta 0), all survive prefix 100
    let rebuilt = table.rebuild_for_prefix(100);
    assert_eq!(rebuilt.start_code[0], 10);
    assert_eq!(rebuilt.end_code[0], 14);
    // trailer segment always present
    assert_eq!(*rebuilt.start_code.last().unwrap(), 0xFFFF);
}

#[test]
fn test_format6_cmap_skips_zero_glyphs() {
    let table = CmapFormat6 { first_code: 100, glyph_id_array: vec![0, 7, 8] };
    let cmap = table.cmap();
    assert_eq!(cmap.get(&100), None);
    assert_eq!(cmap.get(&101), Some(&7));
    assert_eq!(cmap.get(&102), Some(&8));
}

#[test]
fn test_format6_write_then_read_round_trips() {
    let table = CmapFormat6 { first_code: 32, glyph_id_array: vec![1, 2, 3] };
    let mut buf = Vec::new();
    table.write(&mut buf).unwrap();
    let mut reader = Cursor::new(buf);
    let _format = reader.read_u16::<BigEndian>().unwrap();
    let round_tripped = CmapFormat6::from_reader(&mut reader).unwrap();
    assert_eq!(round_tripped.first_code, 32);
    assert_eq!(round_tripped.glyph_id_array, vec![1, 2, 3]);
}

#[test]
fn test_format12_cmap_and_rebuild() {
    let table = CmapFormat12 {
        groups: vec![SequentialMapGroup {
            start_char_code: 0x10000,
            end_char_code: 0x10002,
            start_glyph_id: 50,
        }],
    };
    let cmap = table.cmap();
    assert_eq!(cmap.get(&0x10000), Some(&50));
    assert_eq!(cmap.get(&0x10002), Some(&52));

    let rebuilt = table.rebuild_for_prefix(51);
    assert_eq!(rebuilt.groups.len(), 1);
    assert_eq!(rebuilt.groups[0].end_char_code, 0x10000);
}

#[test]
fn test_table_cmap_subtable_lookup_prefers_first_match() {
    let table = TableCmap {
        version: 0,
        entries: vec![
            CmapEntry {
                platform_id: 3,
                encoding_id: 1,
                subtable: CmapSubtable::Format6(CmapFormat6 {
                    first_code: 0,
                    glyph_id_array: vec![1],
                }),
            },
            CmapEntry {
                platform_id: 1,
                encoding_id: 0,
                subtable: CmapSubtable::Format0(CmapFormat0::default()),
            },
        ],
    };
    assert!(matches!(
        table.subtable(1, 0),
        Some(CmapSubtable::Format0(_))
    ));
    assert!(table.subtable(9, 9).is_none());
}

#[test]
fn test_table_cmap_write_then_read_round_trips() {
    let table = TableCmap {
        version: 0,
        entries: vec![CmapEntry {
            platform_id: 3,
            encoding_id: 1,
            subtable: CmapSubtable::Format6(CmapFormat6 {
                first_code: 65,
                glyph_id_array: vec![1, 2],
            }),
        }],
    };
    let mut buf = Vec::new();
    table.write(&mut buf).unwrap();
    assert_eq!(buf.len(), table.len() as usize);

    let mut reader = Cursor::new(buf);
    let round_tripped =
        TableCmap::from_reader_exact(&mut reader, 0, table.len() as usize).unwrap();
    assert_eq!(round_tripped.entries.len(), 1);
    assert!(matches!(
        round_tripped.entries[0].subtable,
        CmapSubtable::Format6(_)
    ));
}

#[test]
fn test_other_format_is_preserved_verbatim() {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_be_bytes()); // format 2, unsupported
    data.extend_from_slice(&[1, 2, 3, 4]);
    let mut reader = Cursor::new(data.clone());
    let subtable = CmapSubtable::from_reader(&mut reader, 0).unwrap();
    match subtable {
        CmapSubtable::Other { format, raw } => {
            assert_eq!(format, 2);
            assert_eq!(raw, data);
        }
        _ => panic!("expected Other"),
    }
}
