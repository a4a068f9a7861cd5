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

//! 'cmap' SFNT table: character-to-glyph mapping subtables.
//!
//! Each subtable is dispatched by its own `format` field into one of the
//! four variants this engine understands (0, 4, 6, 12); anything else is
//! kept unparsed. Every variant caches the decoded `(rune, glyph)` pairs at
//! parse time so lookups and rebuilds never have to re-walk the wire
//! encoding.

use std::{
    collections::BTreeMap,
    io::{Read, Seek, SeekFrom, Write},
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, types::GlyphIndex, FontDataChecksum,
    FontDataExactRead, FontDataWrite, FontTable,
};

/// A single entry in a 'cmap' header: which (platform, encoding) a subtable
/// is registered under, and where to find it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub offset: u32,
}

/// Format 0: a flat byte-indexed table, one entry per code point 0..256.
#[derive(Clone, Debug, Default)]
pub(crate) struct CmapFormat0 {
    pub glyph_id_array: [u8; 256],
}

impl CmapFormat0 {
    fn from_reader<T: Read + ?Sized>(reader: &mut T) -> Result<Self, FontIoError> {
        let mut glyph_id_array = [0u8; 256];
        reader.read_exact(&mut glyph_id_array)?;
        Ok(Self { glyph_id_array })
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        dest.write_u16::<BigEndian>(0)?;
        dest.write_u16::<BigEndian>(self.len())?;
        dest.write_u16::<BigEndian>(0)?; // language
        dest.write_all(&self.glyph_id_array)?;
        Ok(())
    }

    fn len(&self) -> u16 {
        6 + 256
    }

    fn runes(&self) -> BTreeMap<u32, u32> {
        self.glyph_id_array
            .iter()
            .enumerate()
            .map(|(code, _)| (code as u32, code as u32))
            .collect()
    }

    fn cmap(&self) -> BTreeMap<u32, GlyphIndex> {
        self.glyph_id_array
            .iter()
            .enumerate()
            .map(|(code, gid)| (code as u32, *gid as GlyphIndex))
            .collect()
    }

    /// Zeroes any entry whose mapped GID is no longer kept.
    fn rebuild_for_prefix(&self, n: u16) -> Self {
        let mut glyph_id_array = self.glyph_id_array;
        for gid in glyph_id_array.iter_mut() {
            if *gid as u16 >= n {
                *gid = 0;
            }
        }
        Self { glyph_id_array }
    }
}

/// Format 4: the standard BMP segmented mapping.
#[derive(Clone, Debug, Default)]
pub(crate) struct CmapFormat4 {
    pub start_code: Vec<u16>,
    pub end_code: Vec<u16>,
    pub id_delta: Vec<i16>,
    pub id_range_offset: Vec<u16>,
    pub glyph_id_array: Vec<u16>,
}

impl CmapFormat4 {
    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, FontIoError> {
        let _length = reader.read_u16::<BigEndian>()?;
        let _language = reader.read_u16::<BigEndian>()?;
        let seg_count_x2 = reader.read_u16::<BigEndian>()?;
        let seg_count = (seg_count_x2 / 2) as usize;
        let _search_range = reader.read_u16::<BigEndian>()?;
        let _entry_selector = reader.read_u16::<BigEndian>()?;
        let _range_shift = reader.read_u16::<BigEndian>()?;

        let mut end_code = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            end_code.push(reader.read_u16::<BigEndian>()?);
        }
        let _reserved_pad = reader.read_u16::<BigEndian>()?;
        let mut start_code = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            start_code.push(reader.read_u16::<BigEndian>()?);
        }
        let mut id_delta = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_delta.push(reader.read_i16::<BigEndian>()?);
        }
        let mut id_range_offset = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_range_offset.push(reader.read_u16::<BigEndian>()?);
        }

        // glyphIdArray fills whatever remains; read generously and let
        // out-of-range idRangeOffset math simply stop at the boundary.
        let mut remaining = Vec::new();
        reader.read_to_end(&mut remaining)?;
        let glyph_id_array = remaining
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            start_code,
            end_code,
            id_delta,
            id_range_offset,
            glyph_id_array,
        })
    }

    fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    fn len(&self) -> u16 {
        (14 + 8 * self.seg_count() + 2 * self.glyph_id_array.len()) as u16
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        let seg_count = self.seg_count();
        let seg_count_x2 = (seg_count * 2) as u16;
        let floor_log2 = if seg_count == 0 {
            0
        } else {
            (usize::BITS - 1 - seg_count.leading_zeros()) as u16
        };
        let search_range = 2 * (1u16 << floor_log2);
        let entry_selector = floor_log2;
        let range_shift = seg_count_x2.saturating_sub(search_range);

        dest.write_u16::<BigEndian>(4)?;
        dest.write_u16::<BigEndian>(self.len())?;
        dest.write_u16::<BigEndian>(0)?; // language
        dest.write_u16::<BigEndian>(seg_count_x2)?;
        dest.write_u16::<BigEndian>(search_range)?;
        dest.write_u16::<BigEndian>(entry_selector)?;
        dest.write_u16::<BigEndian>(range_shift)?;
        for code in &self.end_code {
            dest.write_u16::<BigEndian>(*code)?;
        }
        dest.write_u16::<BigEndian>(0)?; // reservedPad
        for code in &self.start_code {
            dest.write_u16::<BigEndian>(*code)?;
        }
        for delta in &self.id_delta {
            dest.write_i16::<BigEndian>(*delta)?;
        }
        for offset in &self.id_range_offset {
            dest.write_u16::<BigEndian>(*offset)?;
        }
        for gid in &self.glyph_id_array {
            dest.write_u16::<BigEndian>(*gid)?;
        }
        Ok(())
    }

    /// Maps a single code point using the binary-search-friendly segment
    /// arrays, following the `idRangeOffset` indirection when present.
    fn map_char(&self, code: u32) -> Option<GlyphIndex> {
        if code > 0xFFFF {
            return None;
        }
        let code = code as u16;
        let seg = self.end_code.iter().position(|&end| end >= code)?;
        if self.start_code[seg] > code {
            return None;
        }
        if self.id_range_offset[seg] == 0 {
            return Some(code.wrapping_add(self.id_delta[seg] as u16));
        }
        let glyph_index_offset = (self.id_range_offset[seg] / 2) as isize
            + (code - self.start_code[seg]) as isize
            + seg as isize
            - self.id_range_offset.len() as isize;
        let gid = *self
            .glyph_id_array
            .get(usize::try_from(glyph_index_offset).ok()?)?;
        if gid == 0 {
            return Some(0);
        }
        Some(gid.wrapping_add(self.id_delta[seg] as u16))
    }

    fn runes(&self) -> BTreeMap<u32, u32> {
        let mut out = BTreeMap::new();
        for seg in 0..self.seg_count() {
            if self.start_code[seg] == 0xFFFF && self.end_code[seg] == 0xFFFF {
                continue;
            }
            for code in self.start_code[seg]..=self.end_code[seg] {
                out.insert(code as u32, code as u32);
            }
        }
        out
    }

    fn cmap(&self) -> BTreeMap<u32, GlyphIndex> {
        let mut out = BTreeMap::new();
        for seg in 0..self.seg_count() {
            if self.start_code[seg] == 0xFFFF && self.end_code[seg] == 0xFFFF {
                continue;
            }
            for code in self.start_code[seg]..=self.end_code[seg] {
                if let Some(gid) = self.map_char(code as u32) {
                    if gid != 0 {
                        out.insert(code as u32, gid);
                    }
                }
            }
        }
        out
    }

    /// Rebuilds this subtable from scratch, keeping only code points that
    /// map to a glyph index below `n`, via a contiguous-run walk over the
    /// subtable's own decoded `runes`.
    fn rebuild_for_prefix(&self, n: u16) -> Self {
        let cmap = self.cmap();
        let kept: Vec<(u32, GlyphIndex)> = cmap
            .into_iter()
            .filter(|&(_, gid)| gid < n)
            .collect();

        let mut start_code = Vec::new();
        let mut end_code = Vec::new();
        let mut id_delta = Vec::new();
        let mut id_range_offset = Vec::new();

        let mut i = 0;
        while i < kept.len() {
            let (start_rune, start_gid) = kept[i];
            let mut j = i;
            while j + 1 < kept.len()
                && kept[j + 1].0 == kept[j].0 + 1
                && kept[j + 1].1 == kept[j].1 + 1
            {
                j += 1;
            }
            let end_rune = kept[j].0;
            start_code.push(start_rune as u16);
            end_code.push(end_rune as u16);
            id_delta.push((start_gid as i32 - start_rune as i32) as i16);
            id_range_offset.push(0);
            i = j + 1;
        }

        start_code.push(0xFFFF);
        end_code.push(0xFFFF);
        id_delta.push(1);
        id_range_offset.push(0);

        Self {
            start_code,
            end_code,
            id_delta,
            id_range_offset,
            glyph_id_array: Vec::new(),
        }
    }
}

/// Format 6: a dense run of glyph indices for a contiguous code range.
#[derive(Clone, Debug, Default)]
pub(crate) struct CmapFormat6 {
    pub first_code: u16,
    pub glyph_id_array: Vec<u16>,
}

impl CmapFormat6 {
    fn from_reader<T: Read + ?Sized>(reader: &mut T) -> Result<Self, FontIoError> {
        let _length = reader.read_u16::<BigEndian>()?;
        let _language = reader.read_u16::<BigEndian>()?;
        let first_code = reader.read_u16::<BigEndian>()?;
        let entry_count = reader.read_u16::<BigEndian>()?;
        let mut glyph_id_array = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            glyph_id_array.push(reader.read_u16::<BigEndian>()?);
        }
        Ok(Self {
            first_code,
            glyph_id_array,
        })
    }

    fn len(&self) -> u16 {
        (10 + 2 * self.glyph_id_array.len()) as u16
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        dest.write_u16::<BigEndian>(6)?;
        dest.write_u16::<BigEndian>(self.len())?;
        dest.write_u16::<BigEndian>(0)?; // language
        dest.write_u16::<BigEndian>(self.first_code)?;
        dest.write_u16::<BigEndian>(self.glyph_id_array.len() as u16)?;
        for gid in &self.glyph_id_array {
            dest.write_u16::<BigEndian>(*gid)?;
        }
        Ok(())
    }

    fn runes(&self) -> BTreeMap<u32, u32> {
        (0..self.glyph_id_array.len())
            .map(|i| {
                let code = self.first_code as u32 + i as u32;
                (code, code)
            })
            .collect()
    }

    fn cmap(&self) -> BTreeMap<u32, GlyphIndex> {
        self.glyph_id_array
            .iter()
            .enumerate()
            .filter(|(_, gid)| **gid != 0)
            .map(|(i, gid)| (self.first_code as u32 + i as u32, *gid))
            .collect()
    }

    /// Zeroes any entry whose mapped GID is no longer kept.
    fn rebuild_for_prefix(&self, n: u16) -> Self {
        let glyph_id_array = self
            .glyph_id_array
            .iter()
            .map(|&gid| if gid >= n { 0 } else { gid })
            .collect();
        Self {
            first_code: self.first_code,
            glyph_id_array,
        }
    }
}

/// A single format-12 group: a contiguous range of code points mapped to a
/// contiguous range of glyph indices starting at `start_glyph_id`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SequentialMapGroup {
    pub start_char_code: u32,
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

/// Format 12: the 32-bit analogue of format 4, for supplementary-plane
/// coverage.
#[derive(Clone, Debug, Default)]
pub(crate) struct CmapFormat12 {
    pub groups: Vec<SequentialMapGroup>,
}

impl CmapFormat12 {
    fn from_reader<T: Read + ?Sized>(reader: &mut T) -> Result<Self, FontIoError> {
        let _reserved = reader.read_u16::<BigEndian>()?;
        let _length = reader.read_u32::<BigEndian>()?;
        let _language = reader.read_u32::<BigEndian>()?;
        let num_groups = reader.read_u32::<BigEndian>()?;
        let mut groups = Vec::with_capacity(num_groups as usize);
        for _ in 0..num_groups {
            groups.push(SequentialMapGroup {
                start_char_code: reader.read_u32::<BigEndian>()?,
                end_char_code: reader.read_u32::<BigEndian>()?,
                start_glyph_id: reader.read_u32::<BigEndian>()?,
            });
        }
        Ok(Self { groups })
    }

    fn len(&self) -> u32 {
        16 + 12 * self.groups.len() as u32
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        dest.write_u16::<BigEndian>(12)?;
        dest.write_u16::<BigEndian>(0)?; // reserved
        dest.write_u32::<BigEndian>(self.len())?;
        dest.write_u32::<BigEndian>(0)?; // language
        dest.write_u32::<BigEndian>(self.groups.len() as u32)?;
        for group in &self.groups {
            dest.write_u32::<BigEndian>(group.start_char_code)?;
            dest.write_u32::<BigEndian>(group.end_char_code)?;
            dest.write_u32::<BigEndian>(group.start_glyph_id)?;
        }
        Ok(())
    }

    fn runes(&self) -> BTreeMap<u32, u32> {
        let mut out = BTreeMap::new();
        for group in &self.groups {
            for code in group.start_char_code..=group.end_char_code {
                out.insert(code, code);
            }
        }
        out
    }

    fn cmap(&self) -> BTreeMap<u32, GlyphIndex> {
        let mut out = BTreeMap::new();
        for group in &self.groups {
            for (i, code) in (group.start_char_code..=group.end_char_code).enumerate() {
                let gid = group.start_glyph_id + i as u32;
                if gid <= u16::MAX as u32 {
                    out.insert(code, gid as GlyphIndex);
                }
            }
        }
        out
    }

    fn rebuild_for_prefix(&self, n: u16) -> Self {
        let cmap = self.cmap();
        let kept: Vec<(u32, GlyphIndex)> =
            cmap.into_iter().filter(|&(_, gid)| gid < n).collect();

        let mut groups = Vec::new();
        let mut i = 0;
        while i < kept.len() {
            let (start_code, start_gid) = kept[i];
            let mut j = i;
            while j + 1 < kept.len()
                && kept[j + 1].0 == kept[j].0 + 1
                && kept[j + 1].1 == kept[j].1 + 1
            {
                j += 1;
            }
            groups.push(SequentialMapGroup {
                start_char_code: start_code,
                end_char_code: kept[j].0,
                start_glyph_id: start_gid as u32,
            });
            i = j + 1;
        }

        Self { groups }
    }
}

/// Tagged union over the cmap subtable formats this engine understands.
#[derive(Clone, Debug)]
pub(crate) enum CmapSubtable {
    Format0(CmapFormat0),
    Format4(CmapFormat4),
    Format6(CmapFormat6),
    Format12(CmapFormat12),
    /// A recognized-but-unsupported format (2, 8, 10, 13, 14, ...),
    /// preserved verbatim.
    Other { format: u16, raw: Vec<u8> },
}

impl CmapSubtable {
    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
    ) -> Result<Self, FontIoError> {
        reader.seek(SeekFrom::Start(offset))?;
        let format = reader.read_u16::<BigEndian>()?;
        Ok(match format {
            0 => CmapSubtable::Format0(CmapFormat0::from_reader(reader)?),
            4 => CmapSubtable::Format4(CmapFormat4::from_reader(reader)?),
            6 => CmapSubtable::Format6(CmapFormat6::from_reader(reader)?),
            12 => CmapSubtable::Format12(CmapFormat12::from_reader(reader)?),
            other => {
                reader.seek(SeekFrom::Start(offset))?;
                let mut raw = Vec::new();
                reader.read_to_end(&mut raw)?;
                CmapSubtable::Other { format: other, raw }
            }
        })
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        match self {
            CmapSubtable::Format0(table) => table.write(dest),
            CmapSubtable::Format4(table) => table.write(dest),
            CmapSubtable::Format6(table) => table.write(dest),
            CmapSubtable::Format12(table) => table.write(dest),
            CmapSubtable::Other { raw, .. } => {
                dest.write_all(raw)?;
                Ok(())
            }
        }
    }

    fn len(&self) -> u32 {
        match self {
            CmapSubtable::Format0(table) => table.len() as u32,
            CmapSubtable::Format4(table) => table.len() as u32,
            CmapSubtable::Format6(table) => table.len() as u32,
            CmapSubtable::Format12(table) => table.len(),
            CmapSubtable::Other { raw, .. } => raw.len() as u32,
        }
    }

    /// Decoded code-point-to-position map, cached by the caller at parse
    /// time per the per-subtable cache described in the table contract.
    pub(crate) fn runes(&self) -> BTreeMap<u32, u32> {
        match self {
            CmapSubtable::Format0(table) => table.runes(),
            CmapSubtable::Format4(table) => table.runes(),
            CmapSubtable::Format6(table) => table.runes(),
            CmapSubtable::Format12(table) => table.runes(),
            CmapSubtable::Other { .. } => BTreeMap::new(),
        }
    }

    /// Decoded code-point-to-glyph map.
    pub(crate) fn cmap(&self) -> BTreeMap<u32, GlyphIndex> {
        match self {
            CmapSubtable::Format0(table) => table.cmap(),
            CmapSubtable::Format4(table) => table.cmap(),
            CmapSubtable::Format6(table) => table.cmap(),
            CmapSubtable::Format12(table) => table.cmap(),
            CmapSubtable::Other { .. } => BTreeMap::new(),
        }
    }

    /// Rebuilds this subtable so that only glyph indices below `n` survive,
    /// per the contiguity-walk/zero-out rules of each format.
    pub(crate) fn rebuild_for_prefix(&self, n: u16) -> Self {
        match self {
            CmapSubtable::Format0(table) => {
                CmapSubtable::Format0(table.rebuild_for_prefix(n))
            }
            CmapSubtable::Format4(table) => {
                CmapSubtable::Format4(table.rebuild_for_prefix(n))
            }
            CmapSubtable::Format6(table) => {
                CmapSubtable::Format6(table.rebuild_for_prefix(n))
            }
            CmapSubtable::Format12(table) => {
                CmapSubtable::Format12(table.rebuild_for_prefix(n))
            }
            CmapSubtable::Other { format, raw } => CmapSubtable::Other {
                format: *format,
                raw: raw.clone(),
            },
        }
    }
}

/// A subtable together with the (platform, encoding) pair it is registered
/// under.
#[derive(Clone, Debug)]
pub(crate) struct CmapEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub subtable: CmapSubtable,
}

/// 'cmap' font table.
#[derive(Clone, Debug)]
pub(crate) struct TableCmap {
    pub version: u16,
    pub entries: Vec<CmapEntry>,
}

impl TableCmap {
    /// Looks up a subtable by its (platformID, encodingID) pair, preferring
    /// the first match in encounter order.
    pub(crate) fn subtable(
        &self,
        platform_id: u16,
        encoding_id: u16,
    ) -> Option<&CmapSubtable> {
        self.entries
            .iter()
            .find(|entry| {
                entry.platform_id == platform_id && entry.encoding_id == encoding_id
            })
            .map(|entry| &entry.subtable)
    }

    /// Regenerates every subtable for a prefix of `n` glyphs.
    pub(crate) fn rebuild_for_prefix(&self, n: u16) -> Self {
        Self {
            version: self.version,
            entries: self
                .entries
                .iter()
                .map(|entry| CmapEntry {
                    platform_id: entry.platform_id,
                    encoding_id: entry.encoding_id,
                    subtable: entry.subtable.rebuild_for_prefix(n),
                })
                .collect(),
        }
    }
}

impl FontDataExactRead for TableCmap {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        _size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let version = reader.read_u16::<BigEndian>()?;
        let num_tables = reader.read_u16::<BigEndian>()?;

        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            records.push(EncodingRecord {
                platform_id: reader.read_u16::<BigEndian>()?,
                encoding_id: reader.read_u16::<BigEndian>()?,
                offset: reader.read_u32::<BigEndian>()?,
            });
        }

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let subtable = CmapSubtable::from_reader(
                reader,
                offset + record.offset as u64,
            )?;
            entries.push(CmapEntry {
                platform_id: record.platform_id,
                encoding_id: record.encoding_id,
                subtable,
            });
        }

        Ok(Self { version, entries })
    }
}

impl FontDataWrite for TableCmap {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_u16::<BigEndian>(self.version)?;
        dest.write_u16::<BigEndian>(self.entries.len() as u16)?;

        let header_size = 4 + 8 * self.entries.len();
        let mut offset = header_size as u32;
        let mut offsets = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            offsets.push(offset);
            offset += entry.subtable.len();
        }

        for (entry, offset) in self.entries.iter().zip(&offsets) {
            dest.write_u16::<BigEndian>(entry.platform_id)?;
            dest.write_u16::<BigEndian>(entry.encoding_id)?;
            dest.write_u32::<BigEndian>(*offset)?;
        }
        for entry in &self.entries {
            entry.subtable.write(dest)?;
        }
        Ok(())
    }
}

impl FontDataChecksum for TableCmap {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableCmap {
    fn len(&self) -> u32 {
        let header_size = 4 + 8 * self.entries.len() as u32;
        header_size
            + self
                .entries
                .iter()
                .map(|entry| entry.subtable.len())
                .sum::<u32>()
    }
}

#[cfg(test)]
#[path = "cmap_test.rs"]
mod tests;
