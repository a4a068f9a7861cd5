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

//! Tests for font subsetting.
use std::collections::{BTreeMap, BTreeSet};

use crate::sfnt::header::SfntHeader;
use crate::sfnt::table::{
    cmap::{CmapEntry, CmapFormat6, CmapSubtable, TableCmap},
    glyf::GlyphDescription,
    head::TableHead,
    hhea::TableHhea,
    hmtx::{LongHorMetric, TableHmtx},
    loca::TableLoca,
    maxp::TableMaxp,
    post::{PostHeader, PostVersion, TablePost},
};
use crate::types::Fixed;

use super::*;

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;

fn simple_glyph() -> GlyphDescription {
    GlyphDescription { raw: vec![0u8; 10] }
}

fn composite_glyph(component: u16) -> GlyphDescription {
    let mut raw = vec![0u8; 10];
    raw[0..2].copy_from_slice(&(-1i16).to_be_bytes());
    raw.extend_from_slice(&ARG_1_AND_2_ARE_WORDS.to_be_bytes());
    raw.extend_from_slice(&component.to_be_bytes());
    raw.extend_from_slice(&0i16.to_be_bytes());
    raw.extend_from_slice(&0i16.to_be_bytes());
    GlyphDescription { raw }
}

fn head() -> TableHead {
    TableHead {
        majorVersion: 1,
        minorVersion: 0,
        fontRevision: 0x0001_0000,
        checksumAdjustment: 0,
        magicNumber: 0x5f0f_3cf5,
        flags: 0,
        unitsPerEm: 1000,
        created: 0,
        modified: 0,
        xMin: 0,
        yMin: 0,
        xMax: 0,
        yMax: 0,
        macStyle: 0,
        lowestRecPPEM: 8,
        fontDirectionHint: 2,
        indexToLocFormat: 1,
        glyphDataFormat: 0,
    }
}

fn hhea(number_of_h_metrics: u16) -> TableHhea {
    TableHhea {
        version: Fixed(0x0001_0000),
        ascender: 800,
        descender: -200,
        lineGap: 0,
        advanceWidthMax: 500,
        minLeftSideBearing: 0,
        minRightSideBearing: 0,
        xMaxExtent: 500,
        caretSlopeRise: 1,
        caretSlopeRun: 0,
        caretOffset: 0,
        reserved: [0; 4],
        metricDataFormat: 0,
        numberOfHMetrics: number_of_h_metrics,
    }
}

/// Builds a font with `descs.len()` glyphs. Rune 'A' (0x41) is mapped to
/// glyph index 1 via a (3,1) format-6 cmap subtable (format 6 treats glyph
/// index 0 as unmapped, so the probe rune must point past it).
fn build_font(descs: Vec<GlyphDescription>) -> SfntFont {
    let num_glyphs = descs.len() as u16;
    let lengths: Vec<u32> = descs.iter().map(|d| d.raw.len() as u32).collect();
    let mut offsets = vec![0u32];
    let mut running = 0u32;
    for len in &lengths {
        running += len;
        offsets.push(running);
    }

    let mut tables = BTreeMap::new();
    tables.insert(FontTag::HEAD, NamedTable::Head(head()));
    tables.insert(
        FontTag::MAXP,
        NamedTable::Maxp(TableMaxp::Version10 {
            num_glyphs,
            max_points: 0,
            max_contours: 0,
            max_component_points: 0,
            max_component_contours: 0,
            max_zones: 0,
            max_twilight_points: 0,
            max_storage: 0,
            max_function_defs: 0,
            max_instruction_defs: 0,
            max_stack_elements: 0,
            max_size_of_instructions: 0,
            max_component_elements: 0,
            max_component_depth: 0,
        }),
    );
    tables.insert(FontTag::HHEA, NamedTable::Hhea(hhea(1)));
    tables.insert(
        FontTag::HMTX,
        NamedTable::Hmtx(TableHmtx {
            h_metrics: vec![LongHorMetric { advance_width: 500, lsb: 0 }],
            left_side_bearings: vec![0; (num_glyphs as usize).saturating_sub(1)],
        }),
    );
    tables.insert(
        FontTag::LOCA,
        NamedTable::Loca(TableLoca { offsets, short_format: false }),
    );
    tables.insert(FontTag::GLYF, NamedTable::Glyf(TableGlyf { descs }));
    tables.insert(
        FontTag::CMAP,
        NamedTable::Cmap(TableCmap {
            version: 0,
            entries: vec![CmapEntry {
                platform_id: 3,
                encoding_id: 1,
                subtable: CmapSubtable::Format6(CmapFormat6 {
                    first_code: 0x41,
                    glyph_id_array: vec![1],
                }),
            }],
        }),
    );
    tables.insert(
        FontTag::POST,
        NamedTable::Post(TablePost {
            header: PostHeader {
                italicAngle: Fixed(0),
                underlinePosition: -100,
                underlineThickness: 50,
                isFixedPitch: 0,
                minMemType42: 0,
                maxMemType42: 0,
                minMemType1: 0,
                maxMemType1: 0,
            },
            version: PostVersion::V3,
        }),
    );

    SfntFont::from_tables(SfntHeader::default(), SfntDirectory::new(), tables)
}

#[test]
fn test_subset_keep_indices_pulls_in_composite_components() {
    let font = build_font(vec![simple_glyph(), simple_glyph(), composite_glyph(0)]);
    let mut indices = BTreeSet::new();
    indices.insert(2u16);

    let subset = subset_keep_indices(&font, &indices).unwrap();
    let glyf = subset.glyf().unwrap();
    assert!(!glyf.descs[0].is_empty());
    assert!(glyf.descs[1].is_empty());
    assert!(!glyf.descs[2].is_empty());
}

#[test]
fn test_subset_keep_indices_rejects_out_of_range() {
    let font = build_font(vec![simple_glyph()]);
    let mut indices = BTreeSet::new();
    indices.insert(5u16);
    let result = subset_keep_indices(&font, &indices);
    assert!(matches!(
        result,
        Err(FontIoError::SubsetError(FontSubsetError::GlyphIndexOutOfRange(5)))
    ));
}

#[test]
fn test_subset_keep_runes_resolves_through_cmap() {
    let font = build_font(vec![simple_glyph(), simple_glyph()]);
    let subset = subset_keep_runes(&font, &[0x41]).unwrap();
    let glyf = subset.glyf().unwrap();
    assert!(glyf.descs[0].is_empty());
    assert!(!glyf.descs[1].is_empty());
}

#[test]
fn test_subset_keep_runes_rejects_unmapped_rune() {
    let font = build_font(vec![simple_glyph()]);
    let result = subset_keep_runes(&font, &[0x1F600]);
    assert!(matches!(
        result,
        Err(FontIoError::SubsetError(FontSubsetError::RuneNotFound(0x1F600)))
    ));
}

#[test]
fn test_subset_simple_rejects_redundant_request() {
    let font = build_font(vec![simple_glyph(), simple_glyph()]);
    let result = subset_simple(&font, 2);
    assert!(matches!(
        result,
        Err(FontIoError::SubsetError(FontSubsetError::Redundant(_)))
    ));
}

#[test]
fn test_subset_simple_zeroes_component_outside_prefix() {
    let font = build_font(vec![simple_glyph(), composite_glyph(0), simple_glyph()]);
    let subset = subset_simple(&font, 2).unwrap();
    let glyf = subset.glyf().unwrap();
    assert_eq!(glyf.descs.len(), 2);
    // component 0 is inside the prefix, so glyph 1 should survive.
    assert!(!glyf.descs[1].is_empty());

    let maxp = subset.maxp().unwrap();
    assert_eq!(maxp.num_glyphs(), 2);
}

#[test]
fn test_subset_simple_zeroes_dangling_component_reference() {
    // Glyph 0 is composite, referencing glyph 2, which is cut by the prefix.
    let font = build_font(vec![composite_glyph(2), simple_glyph(), simple_glyph()]);
    let subset = subset_simple(&font, 2).unwrap();
    let glyf = subset.glyf().unwrap();
    assert!(glyf.descs[0].is_empty());
}

#[test]
fn test_subset_simple_trims_and_remaps_post_glyph_names() {
    // Glyph 0 uses a standard Macintosh name, glyph 1 has a custom name that
    // survives the subset, glyph 2 has a custom name that is cut away.
    let mut font = build_font(vec![simple_glyph(), simple_glyph(), simple_glyph()]);
    font.tables.insert(
        FontTag::POST,
        NamedTable::Post(TablePost {
            header: PostHeader {
                italicAngle: Fixed(0),
                underlinePosition: -100,
                underlineThickness: 50,
                isFixedPitch: 0,
                minMemType42: 0,
                maxMemType42: 0,
                minMemType1: 0,
                maxMemType1: 0,
            },
            version: PostVersion::V2 {
                glyph_name_index: vec![0, 258, 259],
                names: vec![b"glyph_one".to_vec(), b"glyph_two".to_vec()],
            },
        }),
    );

    let subset = subset_simple(&font, 2).unwrap();
    match subset.table(&FontTag::POST).unwrap() {
        NamedTable::Post(post) => match &post.version {
            PostVersion::V2 { glyph_name_index, names } => {
                assert_eq!(glyph_name_index, &vec![0, 258]);
                assert_eq!(names, &vec![b"glyph_one".to_vec()]);
            }
            _ => panic!("expected V2"),
        },
        _ => panic!("expected Post"),
    }
}
