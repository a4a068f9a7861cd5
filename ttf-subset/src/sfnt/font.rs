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

//! SFNT font aggregate.
//!
//! Parsing enforces the cross-table dependencies described in the table
//! modules: `head`/`maxp` before `loca`, `hhea` before `hmtx`, `loca` before
//! `glyf`. Writing always recomputes the header and directory from the
//! current table set and emits table payloads in the fixed layout order
//! below, regardless of how many tables changed or what order they were
//! read in.

use std::{
    collections::BTreeMap,
    io::{Read, Seek, SeekFrom, Write},
    num::Wrapping,
};

use super::{
    directory::{SfntDirectory, SfntDirectoryEntry},
    header::SfntHeader,
    table::{
        cmap::TableCmap, glyf::TableGlyf, head::TableHead,
        head::SFNT_EXPECTED_CHECKSUM, hhea::TableHhea, hmtx::TableHmtx,
        loca::TableLoca, maxp::TableMaxp, named_table::NamedTable,
        os2::TableOs2, post::TablePost,
    },
};
use crate::{
    error::FontIoError, tag::FontTag, types::GlyphIndex,
    utils::align_to_four, Font, FontDataChecksum, FontDataRead,
    FontDataWrite, FontDirectory, FontHeader, MutFontDataWrite,
};

/// The fixed table payload order the serializer always emits, skipping any
/// table that is absent from the font.
const LAYOUT_ORDER: [FontTag; 12] = [
    FontTag::HEAD,
    FontTag::HHEA,
    FontTag::MAXP,
    FontTag::OS2,
    FontTag::HMTX,
    FontTag::CMAP,
    FontTag::CVT,
    FontTag::PREP,
    FontTag::LOCA,
    FontTag::GLYF,
    FontTag::NAME,
    FontTag::POST,
];

/// Implementation of an SFNT font.
pub struct SfntFont {
    pub(crate) header: SfntHeader,
    pub(crate) directory: SfntDirectory,
    pub(crate) tables: BTreeMap<FontTag, NamedTable>,
}

impl SfntFont {
    /// Builds a font directly from its parts. Used by the subsetter, which
    /// never re-parses bytes, only transforms an already-parsed font.
    pub(crate) fn from_tables(
        header: SfntHeader,
        directory: SfntDirectory,
        tables: BTreeMap<FontTag, NamedTable>,
    ) -> Self {
        Self {
            header,
            directory,
            tables,
        }
    }

    pub(crate) fn head(&self) -> Result<&TableHead, FontIoError> {
        match self.tables.get(&FontTag::HEAD) {
            Some(NamedTable::Head(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::HEAD)),
        }
    }

    pub(crate) fn maxp(&self) -> Result<&TableMaxp, FontIoError> {
        match self.tables.get(&FontTag::MAXP) {
            Some(NamedTable::Maxp(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::MAXP)),
        }
    }

    pub(crate) fn hhea(&self) -> Result<&TableHhea, FontIoError> {
        match self.tables.get(&FontTag::HHEA) {
            Some(NamedTable::Hhea(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::HHEA)),
        }
    }

    pub(crate) fn hmtx(&self) -> Result<&TableHmtx, FontIoError> {
        match self.tables.get(&FontTag::HMTX) {
            Some(NamedTable::Hmtx(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::HMTX)),
        }
    }

    pub(crate) fn loca(&self) -> Result<&TableLoca, FontIoError> {
        match self.tables.get(&FontTag::LOCA) {
            Some(NamedTable::Loca(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::LOCA)),
        }
    }

    pub(crate) fn glyf(&self) -> Result<&TableGlyf, FontIoError> {
        match self.tables.get(&FontTag::GLYF) {
            Some(NamedTable::Glyf(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::GLYF)),
        }
    }

    pub(crate) fn cmap(&self) -> Result<&TableCmap, FontIoError> {
        match self.tables.get(&FontTag::CMAP) {
            Some(NamedTable::Cmap(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::CMAP)),
        }
    }

    pub(crate) fn post(&self) -> Result<&TablePost, FontIoError> {
        match self.tables.get(&FontTag::POST) {
            Some(NamedTable::Post(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::POST)),
        }
    }

    #[allow(dead_code)] // kept for symmetry with the other table accessors
    pub(crate) fn os2(&self) -> Result<&TableOs2, FontIoError> {
        match self.tables.get(&FontTag::OS2) {
            Some(NamedTable::Os2(table)) => Ok(table),
            _ => Err(FontIoError::MissingTable(FontTag::OS2)),
        }
    }

    /// The number of glyphs in the font, per `maxp.numGlyphs`.
    pub(crate) fn num_glyphs(&self) -> Result<u16, FontIoError> {
        Ok(self.maxp()?.num_glyphs())
    }

    /// Resolves `rune -> GlyphIndex` for a single cmap subtable registered
    /// under `(platformID, encodingID)`, or `None` if no such subtable
    /// exists.
    pub fn get_cmap(
        &self,
        platform_id: u16,
        encoding_id: u16,
    ) -> Option<BTreeMap<u32, GlyphIndex>> {
        let NamedTable::Cmap(cmap) = self.tables.get(&FontTag::CMAP)? else {
            return None;
        };
        cmap.subtable(platform_id, encoding_id).map(|st| st.cmap())
    }

    /// Retains only the given glyph indices (plus, recursively, any
    /// composite glyph components they reference) without changing
    /// `numGlyphs`.
    pub fn subset_keep_indices(
        &self,
        indices: &std::collections::BTreeSet<u16>,
    ) -> Result<Self, FontIoError> {
        crate::subset::subset_keep_indices(self, indices)
    }

    /// Resolves each rune to a glyph index via the preferred cmap subtables
    /// and delegates to [`Self::subset_keep_indices`].
    pub fn subset_keep_runes(
        &self,
        runes: &[u32],
    ) -> Result<Self, FontIoError> {
        crate::subset::subset_keep_runes(self, runes)
    }

    /// Keeps only the first `num_glyphs` glyph indices (a dense prefix).
    pub fn subset_simple(&self, num_glyphs: u16) -> Result<Self, FontIoError> {
        crate::subset::subset_simple(self, num_glyphs)
    }
}

impl FontDataRead for SfntFont {
    type Error = FontIoError;

    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error> {
        let header = SfntHeader::from_reader(reader)?;
        let directory = SfntDirectory::from_reader_with_count(
            reader,
            header.numTables as usize,
        )?;

        let mut tables = BTreeMap::new();
        let mut hmtx_entry = None;
        let mut loca_entry = None;
        let mut glyf_entry = None;

        for entry in directory.entries() {
            match entry.tag {
                FontTag::HMTX => hmtx_entry = Some(*entry),
                FontTag::LOCA => loca_entry = Some(*entry),
                FontTag::GLYF => glyf_entry = Some(*entry),
                tag => {
                    let table = NamedTable::from_reader_exact(
                        &tag,
                        reader,
                        entry.offset as u64,
                        entry.length as usize,
                    )?;
                    tables.insert(tag, table);
                }
            }
        }

        if let Some(entry) = hmtx_entry {
            let number_of_h_metrics = match tables.get(&FontTag::HHEA) {
                Some(NamedTable::Hhea(hhea)) => hhea.numberOfHMetrics,
                _ => return Err(FontIoError::MissingTable(FontTag::HHEA)),
            };
            let num_glyphs = match tables.get(&FontTag::MAXP) {
                Some(NamedTable::Maxp(maxp)) => maxp.num_glyphs(),
                _ => return Err(FontIoError::MissingTable(FontTag::MAXP)),
            };
            let hmtx = TableHmtx::from_reader_with_counts(
                reader,
                entry.offset as u64,
                entry.length as usize,
                number_of_h_metrics,
                num_glyphs,
            )?;
            tables.insert(FontTag::HMTX, NamedTable::Hmtx(hmtx));
        }

        if let Some(entry) = loca_entry {
            let num_glyphs = match tables.get(&FontTag::MAXP) {
                Some(NamedTable::Maxp(maxp)) => maxp.num_glyphs(),
                _ => return Err(FontIoError::MissingTable(FontTag::MAXP)),
            };
            let short_format = match tables.get(&FontTag::HEAD) {
                Some(NamedTable::Head(head)) => head.indexToLocFormat == 0,
                _ => return Err(FontIoError::MissingTable(FontTag::HEAD)),
            };
            let loca = TableLoca::from_reader_with_counts(
                reader,
                entry.offset as u64,
                entry.length as usize,
                num_glyphs,
                short_format,
            )?;
            tables.insert(FontTag::LOCA, NamedTable::Loca(loca));
        }

        if let Some(entry) = glyf_entry {
            let loca_offsets = match tables.get(&FontTag::LOCA) {
                Some(NamedTable::Loca(loca)) => loca.offsets.clone(),
                _ => return Err(FontIoError::MissingTable(FontTag::LOCA)),
            };
            let glyf = TableGlyf::from_reader_with_loca(
                reader,
                entry.offset as u64,
                &loca_offsets,
            )?;
            tables.insert(FontTag::GLYF, NamedTable::Glyf(glyf));
        }

        tracing::debug!(num_tables = tables.len(), "parsed sfnt font");

        Ok(Self {
            header,
            directory,
            tables,
        })
    }

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        _size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        Self::from_reader(reader)
    }
}

impl MutFontDataWrite for SfntFont {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &mut self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        if self.tables.is_empty() {
            return Err(crate::error::FontSaveError::NoTablesFound.into());
        }

        let present: Vec<FontTag> = LAYOUT_ORDER
            .into_iter()
            .filter(|tag| self.tables.contains_key(tag))
            .collect();

        let mut neo_header = SfntHeader::default();
        neo_header.sfntVersion = self.header.sfntVersion;
        neo_header.numTables = present.len() as u16;
        neo_header.entrySelector = if neo_header.numTables > 0 {
            neo_header.numTables.ilog2() as u16
        } else {
            0
        };
        neo_header.searchRange =
            2_u16.pow(neo_header.entrySelector as u32) * 16;
        neo_header.rangeShift =
            neo_header.numTables * 16 - neo_header.searchRange;

        let mut running_offset = SfntHeader::SIZE as u32
            + SfntDirectoryEntry::SIZE as u32 * present.len() as u32;
        let mut neo_directory = SfntDirectory::new();
        for tag in &present {
            let table = &self.tables[tag];
            let entry = SfntDirectoryEntry {
                tag: *tag,
                offset: running_offset,
                checksum: table.checksum().0,
                length: table.len(),
            };
            neo_directory.add_entry(entry);
            running_offset += align_to_four(table.len());
        }

        // Directory entries at file start are always tag-ascending,
        // independent of the payload layout order written after them.
        neo_directory.sort_entries(|entry| entry.tag);

        let font_cksum = neo_header.checksum()
            + neo_directory.checksum()
            + neo_directory
                .entries()
                .iter()
                .fold(Wrapping(0_u32), |tables_cksum, entry| {
                    tables_cksum + Wrapping(entry.checksum)
                });

        if let Some(NamedTable::Head(head)) =
            self.tables.get_mut(&FontTag::HEAD)
        {
            head.checksumAdjustment =
                (Wrapping(SFNT_EXPECTED_CHECKSUM) - font_cksum).0;
        }

        self.header = neo_header;
        self.directory = neo_directory;

        self.header.write(dest)?;
        self.directory.write(dest)?;
        for tag in &present {
            let table = &self.tables[tag];
            let mut buf = Vec::with_capacity(table.len() as usize);
            table.write(&mut buf)?;
            let padding = align_to_four(buf.len() as u32) - buf.len() as u32;
            dest.write_all(&buf)?;
            if padding > 0 {
                dest.write_all(&vec![0u8; padding as usize])?;
            }
        }
        Ok(())
    }
}

impl Font for SfntFont {
    type Directory = SfntDirectory;
    type Header = SfntHeader;
    type Table = NamedTable;

    fn contains_table(&self, tag: &FontTag) -> bool {
        self.tables.contains_key(tag)
    }

    fn table(&self, tag: &FontTag) -> Option<&Self::Table> {
        self.tables.get(tag)
    }

    fn header(&self) -> &Self::Header {
        &self.header
    }

    fn directory(&self) -> &Self::Directory {
        &self.directory
    }
}

#[cfg(test)]
#[path = "font_test.rs"]
mod tests;
