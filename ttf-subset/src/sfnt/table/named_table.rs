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

//! Named table enumeration.
//!
//! `hmtx`, `loca` and `glyf` need cross-table context (glyph counts, the
//! `loca` offsets) that isn't available from a tag and a byte range alone,
//! so they are never constructed through [`NamedTable::from_reader_exact`];
//! the font aggregate parses them explicitly in dependency order and wraps
//! the result in the matching variant.
use std::io::{Read, Seek, Write};

use super::{
    cmap::TableCmap, cvt::TableCvt, generic::TableGeneric, glyf::TableGlyf,
    head::TableHead, hhea::TableHhea, hmtx::TableHmtx, loca::TableLoca,
    maxp::TableMaxp, name::TableName, os2::TableOs2, post::TablePost,
    prep::TablePrep,
};
use crate::{
    error::FontIoError, tag::FontTag, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// Various types of tables by name.
#[derive(Clone)]
pub enum NamedTable {
    Head(TableHead),
    Maxp(TableMaxp),
    Hhea(TableHhea),
    Hmtx(TableHmtx),
    Loca(TableLoca),
    Glyf(TableGlyf),
    Cmap(TableCmap),
    Name(TableName),
    Post(TablePost),
    Os2(TableOs2),
    Cvt(TableCvt),
    Prep(TablePrep),
    Generic(TableGeneric),
}

impl NamedTable {
    /// Dispatches on `tag` to the matching table codec. Never called for
    /// `hmtx`, `loca` or `glyf`; see the module note above.
    pub fn from_reader_exact<T: Read + Seek + ?Sized>(
        tag: &FontTag,
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, FontIoError> {
        match *tag {
            FontTag::HEAD => TableHead::from_reader_exact(reader, offset, size)
                .map(NamedTable::Head),
            FontTag::MAXP => TableMaxp::from_reader_exact(reader, offset, size)
                .map(NamedTable::Maxp),
            FontTag::HHEA => TableHhea::from_reader_exact(reader, offset, size)
                .map(NamedTable::Hhea),
            FontTag::CMAP => TableCmap::from_reader_exact(reader, offset, size)
                .map(NamedTable::Cmap),
            FontTag::NAME => TableName::from_reader_exact(reader, offset, size)
                .map(NamedTable::Name),
            FontTag::POST => TablePost::from_reader_exact(reader, offset, size)
                .map(NamedTable::Post),
            FontTag::OS2 => TableOs2::from_reader_exact(reader, offset, size)
                .map(NamedTable::Os2),
            FontTag::CVT => TableCvt::from_reader_exact(reader, offset, size)
                .map(NamedTable::Cvt),
            FontTag::PREP => TablePrep::from_reader_exact(reader, offset, size)
                .map(NamedTable::Prep),
            _ => TableGeneric::from_reader_exact(reader, offset, size)
                .map(NamedTable::Generic),
        }
    }

    pub fn len(&self) -> u32 {
        match self {
            NamedTable::Head(table) => table.len(),
            NamedTable::Maxp(table) => table.len(),
            NamedTable::Hhea(table) => table.len(),
            NamedTable::Hmtx(table) => table.len(),
            NamedTable::Loca(table) => table.len(),
            NamedTable::Glyf(table) => table.len(),
            NamedTable::Cmap(table) => table.len(),
            NamedTable::Name(table) => table.len(),
            NamedTable::Post(table) => table.len(),
            NamedTable::Os2(table) => table.len(),
            NamedTable::Cvt(table) => table.len(),
            NamedTable::Prep(table) => table.len(),
            NamedTable::Generic(table) => table.len(),
        }
    }
}

impl FontDataWrite for NamedTable {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        match self {
            NamedTable::Head(table) => table.write(dest)?,
            NamedTable::Maxp(table) => table.write(dest)?,
            NamedTable::Hhea(table) => table.write(dest)?,
            NamedTable::Hmtx(table) => table.write(dest)?,
            NamedTable::Loca(table) => table.write(dest)?,
            NamedTable::Glyf(table) => table.write(dest)?,
            NamedTable::Cmap(table) => table.write(dest)?,
            NamedTable::Name(table) => table.write(dest)?,
            NamedTable::Post(table) => table.write(dest)?,
            NamedTable::Os2(table) => table.write(dest)?,
            NamedTable::Cvt(table) => table.write(dest)?,
            NamedTable::Prep(table) => table.write(dest)?,
            NamedTable::Generic(table) => table.write(dest)?,
        }
        Ok(())
    }
}

impl FontDataChecksum for NamedTable {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        match self {
            NamedTable::Head(table) => table.checksum(),
            NamedTable::Maxp(table) => table.checksum(),
            NamedTable::Hhea(table) => table.checksum(),
            NamedTable::Hmtx(table) => table.checksum(),
            NamedTable::Loca(table) => table.checksum(),
            NamedTable::Glyf(table) => table.checksum(),
            NamedTable::Cmap(table) => table.checksum(),
            NamedTable::Name(table) => table.checksum(),
            NamedTable::Post(table) => table.checksum(),
            NamedTable::Os2(table) => table.checksum(),
            NamedTable::Cvt(table) => table.checksum(),
            NamedTable::Prep(table) => table.checksum(),
            NamedTable::Generic(table) => table.checksum(),
        }
    }
}

impl FontTable for NamedTable {
    fn len(&self) -> u32 {
        self.len()
    }
}

#[cfg(test)]
#[path = "named_table_test.rs"]
mod tests;
