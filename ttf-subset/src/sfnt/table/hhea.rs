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

//! 'hhea' SFNT table.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, types::Fixed, utils, FontDataChecksum,
    FontDataExactRead, FontDataRead, FontDataWrite, FontTable,
};

/// 'hhea' font table: horizontal header metrics shared by every glyph.
#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub(crate) struct TableHhea {
    pub version: Fixed,
    pub ascender: i16,
    pub descender: i16,
    pub lineGap: i16,
    pub advanceWidthMax: u16,
    pub minLeftSideBearing: i16,
    pub minRightSideBearing: i16,
    pub xMaxExtent: i16,
    pub caretSlopeRise: i16,
    pub caretSlopeRun: i16,
    pub caretOffset: i16,
    pub reserved: [i16; 4],
    pub metricDataFormat: i16,
    /// Number of entries in `hmtx.hMetrics`.
    pub numberOfHMetrics: u16,
}

impl TableHhea {
    /// The size of an 'hhea' table.
    pub(crate) const SIZE: usize = 36;
}

impl FontDataExactRead for TableHhea {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        if size != Self::SIZE {
            return Err(FontIoError::InvalidFormat(format!(
                "hhea table has wrong size: expected {}, got {size}",
                Self::SIZE
            )));
        }
        Ok(Self {
            version: Fixed::from_reader(reader)?,
            ascender: reader.read_i16::<BigEndian>()?,
            descender: reader.read_i16::<BigEndian>()?,
            lineGap: reader.read_i16::<BigEndian>()?,
            advanceWidthMax: reader.read_u16::<BigEndian>()?,
            minLeftSideBearing: reader.read_i16::<BigEndian>()?,
            minRightSideBearing: reader.read_i16::<BigEndian>()?,
            xMaxExtent: reader.read_i16::<BigEndian>()?,
            caretSlopeRise: reader.read_i16::<BigEndian>()?,
            caretSlopeRun: reader.read_i16::<BigEndian>()?,
            caretOffset: reader.read_i16::<BigEndian>()?,
            reserved: [
                reader.read_i16::<BigEndian>()?,
                reader.read_i16::<BigEndian>()?,
                reader.read_i16::<BigEndian>()?,
                reader.read_i16::<BigEndian>()?,
            ],
            metricDataFormat: reader.read_i16::<BigEndian>()?,
            numberOfHMetrics: reader.read_u16::<BigEndian>()?,
        })
    }
}

impl FontDataWrite for TableHhea {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        use crate::FontDataWrite as _;
        self.version.write(dest)?;
        dest.write_i16::<BigEndian>(self.ascender)?;
        dest.write_i16::<BigEndian>(self.descender)?;
        dest.write_i16::<BigEndian>(self.lineGap)?;
        dest.write_u16::<BigEndian>(self.advanceWidthMax)?;
        dest.write_i16::<BigEndian>(self.minLeftSideBearing)?;
        dest.write_i16::<BigEndian>(self.minRightSideBearing)?;
        dest.write_i16::<BigEndian>(self.xMaxExtent)?;
        dest.write_i16::<BigEndian>(self.caretSlopeRise)?;
        dest.write_i16::<BigEndian>(self.caretSlopeRun)?;
        dest.write_i16::<BigEndian>(self.caretOffset)?;
        for reserved in self.reserved {
            dest.write_i16::<BigEndian>(reserved)?;
        }
        dest.write_i16::<BigEndian>(self.metricDataFormat)?;
        dest.write_u16::<BigEndian>(self.numberOfHMetrics)?;
        Ok(())
    }
}

impl FontDataChecksum for TableHhea {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableHhea {
    fn len(&self) -> u32 {
        Self::SIZE as u32
    }
}

#[cfg(test)]
#[path = "hhea_test.rs"]
mod tests;
