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

//! 'glyf' SFNT table.
//!
//! Glyph outlines are kept as opaque byte blobs: this engine never parses
//! contour data. The only thing it reads out of a glyph description besides
//! its length is, for composite glyphs, the component glyph indices needed
//! to compute a subsetting closure (see [`GlyphDescription::component_glyph_indices`]).

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{error::FontIoError, utils, FontDataChecksum, FontTable};

/// Component flag: the two component arguments are i16 words rather than i8
/// bytes.
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
/// Component flag: a single F2Dot14 scale follows the arguments.
const WE_HAVE_A_SCALE: u16 = 0x0008;
/// Component flag: another component record follows this one.
const MORE_COMPONENTS: u16 = 0x0020;
/// Component flag: separate x and y F2Dot14 scales follow the arguments.
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
/// Component flag: a full 2x2 F2Dot14 transform follows the arguments.
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

/// A single glyph's outline description, kept as opaque bytes.
#[derive(Clone, Debug, Default)]
pub(crate) struct GlyphDescription {
    /// Raw table bytes for this glyph. Empty for `.notdef`-style placeholder
    /// glyphs and for glyphs zeroed out by subsetting.
    pub raw: Vec<u8>,
}

impl GlyphDescription {
    /// Whether this glyph has any outline data at all.
    pub(crate) fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether this is a simple (non-composite) glyph. Determined by the
    /// sign of the leading `numberOfContours` field; empty glyphs are
    /// treated as simple.
    pub(crate) fn is_simple(&self) -> bool {
        if self.raw.len() < 2 {
            return true;
        }
        let number_of_contours = i16::from_be_bytes([self.raw[0], self.raw[1]]);
        number_of_contours >= 0
    }

    /// Returns the glyph indices this composite glyph directly references,
    /// empty for simple or empty glyphs.
    pub(crate) fn component_glyph_indices(&self) -> Vec<u16> {
        if self.is_simple() || self.raw.len() < 10 {
            return Vec::new();
        }
        let mut indices = Vec::new();
        let mut cursor = std::io::Cursor::new(&self.raw[10..]);
        loop {
            let Ok(flags) = cursor.read_u16::<BigEndian>() else {
                break;
            };
            let Ok(glyph_index) = cursor.read_u16::<BigEndian>() else {
                break;
            };
            indices.push(glyph_index);

            let arg_size = if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };
            if cursor.seek(SeekFrom::Current(arg_size)).is_err() {
                break;
            }

            let scale_size = if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
                8
            } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
                4
            } else if flags & WE_HAVE_A_SCALE != 0 {
                2
            } else {
                0
            };
            if scale_size > 0 && cursor.seek(SeekFrom::Current(scale_size)).is_err()
            {
                break;
            }

            if flags & MORE_COMPONENTS == 0 {
                break;
            }
        }
        indices
    }
}

/// 'glyf' font table: the ordered sequence of per-glyph outline descriptions.
#[derive(Clone, Debug, Default)]
pub(crate) struct TableGlyf {
    pub descs: Vec<GlyphDescription>,
}

impl TableGlyf {
    pub(crate) fn from_reader_with_loca<T: Read + Seek + ?Sized>(
        reader: &mut T,
        table_offset: u64,
        loca_offsets: &[u32],
    ) -> Result<Self, FontIoError> {
        let mut descs = Vec::with_capacity(loca_offsets.len().saturating_sub(1));
        for window in loca_offsets.windows(2) {
            let (start, end) = (window[0], window[1]);
            if end < start {
                return Err(FontIoError::InvalidFormat(
                    "loca offsets are not monotonically non-decreasing".into(),
                ));
            }
            let length = (end - start) as usize;
            let mut raw = vec![0u8; length];
            if length > 0 {
                reader.seek(SeekFrom::Start(table_offset + start as u64))?;
                reader.read_exact(&mut raw)?;
            }
            descs.push(GlyphDescription { raw });
        }
        Ok(Self { descs })
    }

    /// Byte lengths of every glyph description, in order; used to rebuild
    /// 'loca' after subsetting.
    pub(crate) fn lengths(&self) -> Vec<u32> {
        self.descs.iter().map(|d| d.raw.len() as u32).collect()
    }
}

impl FontDataChecksum for TableGlyf {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let combined: Vec<u8> =
            self.descs.iter().flat_map(|d| d.raw.iter().copied()).collect();
        utils::checksum(&combined)
    }
}

impl crate::FontDataWrite for TableGlyf {
    type Error = FontIoError;

    fn write<TDest: std::io::Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        // Each glyph description is written exactly as long as its `loca`
        // offsets say it is; any inter-glyph padding is already part of
        // `raw` if the source font carried it. Only the whole table gets
        // padded to a four-byte boundary, by the serializer.
        for desc in &self.descs {
            dest.write_all(&desc.raw)?;
        }
        Ok(())
    }
}

impl FontTable for TableGlyf {
    fn len(&self) -> u32 {
        self.descs.iter().map(|d| d.raw.len() as u32).sum()
    }
}

#[cfg(test)]
#[path = "glyf_test.rs"]
mod tests;
