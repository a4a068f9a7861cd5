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

//! 'post' SFNT table: PostScript glyph names and hinting hints.
//!
//! Only versions 1.0 (implicit standard Macintosh glyph order), 2.0
//! (explicit glyph name array) and 3.0 (no names at all) are modeled
//! directly; anything else is kept as opaque trailing bytes.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, types::Fixed, utils, FontDataChecksum,
    FontDataExactRead, FontDataRead, FontDataWrite, FontTable,
};

const VERSION_1_0: i32 = 0x0001_0000;
const VERSION_2_0: i32 = 0x0002_0000;
const VERSION_3_0: i32 = 0x0003_0000;

/// Fields shared by every 'post' version.
#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub(crate) struct PostHeader {
    pub italicAngle: Fixed,
    pub underlinePosition: i16,
    pub underlineThickness: i16,
    pub isFixedPitch: u32,
    pub minMemType42: u32,
    pub maxMemType42: u32,
    pub minMemType1: u32,
    pub maxMemType1: u32,
}

impl PostHeader {
    const SIZE: usize = 28;

    fn from_reader<T: Read + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, FontIoError> {
        Ok(Self {
            italicAngle: Fixed::from_reader(reader)?,
            underlinePosition: reader.read_i16::<BigEndian>()?,
            underlineThickness: reader.read_i16::<BigEndian>()?,
            isFixedPitch: reader.read_u32::<BigEndian>()?,
            minMemType42: reader.read_u32::<BigEndian>()?,
            maxMemType42: reader.read_u32::<BigEndian>()?,
            minMemType1: reader.read_u32::<BigEndian>()?,
            maxMemType1: reader.read_u32::<BigEndian>()?,
        })
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        self.italicAngle.write(dest)?;
        dest.write_i16::<BigEndian>(self.underlinePosition)?;
        dest.write_i16::<BigEndian>(self.underlineThickness)?;
        dest.write_u32::<BigEndian>(self.isFixedPitch)?;
        dest.write_u32::<BigEndian>(self.minMemType42)?;
        dest.write_u32::<BigEndian>(self.maxMemType42)?;
        dest.write_u32::<BigEndian>(self.minMemType1)?;
        dest.write_u32::<BigEndian>(self.maxMemType1)?;
        Ok(())
    }
}

/// The version-specific portion of a 'post' table.
#[derive(Clone, Debug)]
pub(crate) enum PostVersion {
    /// Version 1.0: glyph names are implicitly the standard 258 Macintosh
    /// glyph names; no data follows the header.
    V1,
    /// Version 2.0: explicit glyph name array, indexing either the standard
    /// names or entries in `names`.
    V2 {
        glyph_name_index: Vec<u16>,
        names: Vec<Vec<u8>>,
    },
    /// Version 3.0: no glyph name data at all.
    V3,
    /// Any other version, preserved as opaque trailing bytes.
    Other { version: i32, trailing: Vec<u8> },
}

/// 'post' font table.
#[derive(Clone, Debug)]
pub(crate) struct TablePost {
    pub header: PostHeader,
    pub version: PostVersion,
}

impl TablePost {
    /// Truncates the glyph name index (version 2.0 only) to the first
    /// `new_num_glyphs` entries, as required after [`SubsetSimple`]. Also
    /// drops any custom name in `names` no longer referenced by a surviving
    /// index and remaps the survivors to the compacted pool.
    ///
    /// [`SubsetSimple`]: crate::subset::subset_simple
    pub(crate) fn truncate_to(&mut self, new_num_glyphs: u16) {
        const STANDARD_MAC_GLYPH_COUNT: u16 = 258;

        if let PostVersion::V2 {
            glyph_name_index,
            names,
        } = &mut self.version
        {
            glyph_name_index.truncate(new_num_glyphs as usize);

            let mut compacted = Vec::new();
            for index in glyph_name_index.iter_mut() {
                if *index >= STANDARD_MAC_GLYPH_COUNT {
                    let old_pos = (*index - STANDARD_MAC_GLYPH_COUNT) as usize;
                    if let Some(name) = names.get(old_pos) {
                        compacted.push(name.clone());
                        *index = STANDARD_MAC_GLYPH_COUNT
                            + (compacted.len() - 1) as u16;
                    }
                }
            }
            *names = compacted;
        }
    }
}

impl FontDataExactRead for TablePost {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        if size < 4 + PostHeader::SIZE {
            return Err(FontIoError::InvalidFormat(format!(
                "post table too short: {size} bytes"
            )));
        }
        let raw_version = reader.read_i32::<byteorder::BigEndian>()?;
        let header = PostHeader::from_reader(reader)?;
        let consumed = 4 + PostHeader::SIZE;

        let version = match raw_version {
            VERSION_1_0 => PostVersion::V1,
            VERSION_3_0 => PostVersion::V3,
            VERSION_2_0 => {
                let num_glyphs = reader.read_u16::<BigEndian>()?;
                let mut glyph_name_index = Vec::with_capacity(num_glyphs as usize);
                for _ in 0..num_glyphs {
                    glyph_name_index.push(reader.read_u16::<BigEndian>()?);
                }
                let consumed_so_far = consumed + 2 + 2 * num_glyphs as usize;
                let mut pool = vec![0u8; size.saturating_sub(consumed_so_far)];
                reader.read_exact(&mut pool)?;
                let mut names = Vec::new();
                let mut pos = 0usize;
                while pos < pool.len() {
                    let len = pool[pos] as usize;
                    pos += 1;
                    if pos + len > pool.len() {
                        break;
                    }
                    names.push(pool[pos..pos + len].to_vec());
                    pos += len;
                }
                PostVersion::V2 {
                    glyph_name_index,
                    names,
                }
            }
            other => {
                let mut trailing = vec![0u8; size.saturating_sub(consumed)];
                reader.read_exact(&mut trailing)?;
                PostVersion::Other {
                    version: other,
                    trailing,
                }
            }
        };

        Ok(Self { header, version })
    }
}

impl FontDataWrite for TablePost {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        let raw_version = match &self.version {
            PostVersion::V1 => VERSION_1_0,
            PostVersion::V2 { .. } => VERSION_2_0,
            PostVersion::V3 => VERSION_3_0,
            PostVersion::Other { version, .. } => *version,
        };
        dest.write_i32::<BigEndian>(raw_version)?;
        self.header.write(dest)?;
        match &self.version {
            PostVersion::V1 | PostVersion::V3 => {}
            PostVersion::V2 {
                glyph_name_index,
                names,
            } => {
                dest.write_u16::<BigEndian>(glyph_name_index.len() as u16)?;
                for index in glyph_name_index {
                    dest.write_u16::<BigEndian>(*index)?;
                }
                for name in names {
                    dest.write_all(&[name.len() as u8])?;
                    dest.write_all(name)?;
                }
            }
            PostVersion::Other { trailing, .. } => {
                dest.write_all(trailing)?;
            }
        }
        Ok(())
    }
}

impl FontDataChecksum for TablePost {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TablePost {
    fn len(&self) -> u32 {
        let base = 4 + PostHeader::SIZE;
        let variable = match &self.version {
            PostVersion::V1 | PostVersion::V3 => 0,
            PostVersion::V2 {
                glyph_name_index,
                names,
            } => {
                2 + 2 * glyph_name_index.len()
                    + names.iter().map(|n| 1 + n.len()).sum::<usize>()
            }
            PostVersion::Other { trailing, .. } => trailing.len(),
        };
        (base + variable) as u32
    }
}

#[cfg(test)]
#[path = "post_test.rs"]
mod tests;
