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

//! 'loca' SFNT table.
//!
//! Like 'hmtx', 'loca' needs outside context to parse: `head.indexToLocFormat`
//! picks between the short (u16, half-offset) and long (u32) encodings, and
//! `maxp.numGlyphs` gives the entry count (`numGlyphs + 1` offsets).

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataWrite, FontTable,
};

/// 'loca' font table: per-glyph byte offsets into 'glyf'.
#[derive(Clone, Debug)]
pub(crate) struct TableLoca {
    /// `numGlyphs + 1` strictly non-decreasing byte offsets into 'glyf'.
    pub offsets: Vec<u32>,
    /// Whether to serialize using the short (u16, half-offset) format.
    pub short_format: bool,
}

impl TableLoca {
    pub(crate) fn from_reader_with_counts<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
        num_glyphs: u16,
        short_format: bool,
    ) -> Result<Self, FontIoError> {
        reader.seek(SeekFrom::Start(offset))?;
        let entry_count = num_glyphs as usize + 1;
        let expected_size = if short_format {
            entry_count * 2
        } else {
            entry_count * 4
        };
        if size < expected_size {
            return Err(FontIoError::InvalidFormat(format!(
                "loca table too short: expected at least {expected_size} bytes, got {size}"
            )));
        }
        let mut offsets = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            let value = if short_format {
                reader.read_u16::<BigEndian>()? as u32 * 2
            } else {
                reader.read_u32::<BigEndian>()?
            };
            offsets.push(value);
        }
        Ok(Self {
            offsets,
            short_format,
        })
    }

    /// Rebuilds the offset array from the lengths of the (possibly pruned
    /// or truncated) glyph descriptions, preserving the original base
    /// offset.
    pub(crate) fn rebuild_from_lengths(&self, lengths: &[u32]) -> Self {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut running = self.offsets.first().copied().unwrap_or(0);
        offsets.push(running);
        for length in lengths {
            running += length;
            offsets.push(running);
        }
        Self {
            offsets,
            short_format: self.short_format,
        }
    }
}

impl FontDataWrite for TableLoca {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        for &value in &self.offsets {
            if self.short_format {
                dest.write_u16::<BigEndian>((value / 2) as u16)?;
            } else {
                dest.write_u32::<BigEndian>(value)?;
            }
        }
        Ok(())
    }
}

impl FontDataChecksum for TableLoca {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableLoca {
    fn len(&self) -> u32 {
        let entry_size = if self.short_format { 2 } else { 4 };
        (self.offsets.len() * entry_size) as u32
    }
}

#[cfg(test)]
#[path = "loca_test.rs"]
mod tests;
