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

//! 'OS/2' SFNT table.
//!
//! Real-world fonts are not always honest about their own version: some
//! version-0 tables are only 68 bytes (predating `ulCodePageRange`) and some
//! claim version 1/2 but were truncated by a buggy producer. Rather than
//! trust `version` alone, the table length gates which trailing fields are
//! actually read, the way widely deployed parsers do.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// Fields present in every 'OS/2' table, regardless of version or length.
#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub(crate) struct Os2Base {
    pub version: u16,
    pub xAvgCharWidth: i16,
    pub usWeightClass: u16,
    pub usWidthClass: u16,
    pub fsType: u16,
    pub ySubscriptXSize: i16,
    pub ySubscriptYSize: i16,
    pub ySubscriptXOffset: i16,
    pub ySubscriptYOffset: i16,
    pub ySuperscriptXSize: i16,
    pub ySuperscriptYSize: i16,
    pub ySuperscriptXOffset: i16,
    pub ySuperscriptYOffset: i16,
    pub yStrikeoutSize: i16,
    pub yStrikeoutPosition: i16,
    pub sFamilyClass: i16,
    pub panose: [u8; 10],
    pub ulUnicodeRange: [u32; 4],
    pub achVendID: [u8; 4],
    pub fsSelection: u16,
    pub usFirstCharIndex: u16,
    pub usLastCharIndex: u16,
    pub sTypoAscender: i16,
    pub sTypoDescender: i16,
    pub sTypoLineGap: i16,
    pub usWinAscent: u16,
    pub usWinDescent: u16,
}

impl Os2Base {
    const SIZE: usize = 78;

    fn from_reader<T: Read + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, FontIoError> {
        Ok(Self {
            version: reader.read_u16::<BigEndian>()?,
            xAvgCharWidth: reader.read_i16::<BigEndian>()?,
            usWeightClass: reader.read_u16::<BigEndian>()?,
            usWidthClass: reader.read_u16::<BigEndian>()?,
            fsType: reader.read_u16::<BigEndian>()?,
            ySubscriptXSize: reader.read_i16::<BigEndian>()?,
            ySubscriptYSize: reader.read_i16::<BigEndian>()?,
            ySubscriptXOffset: reader.read_i16::<BigEndian>()?,
            ySubscriptYOffset: reader.read_i16::<BigEndian>()?,
            ySuperscriptXSize: reader.read_i16::<BigEndian>()?,
            ySuperscriptYSize: reader.read_i16::<BigEndian>()?,
            ySuperscriptXOffset: reader.read_i16::<BigEndian>()?,
            ySuperscriptYOffset: reader.read_i16::<BigEndian>()?,
            yStrikeoutSize: reader.read_i16::<BigEndian>()?,
            yStrikeoutPosition: reader.read_i16::<BigEndian>()?,
            sFamilyClass: reader.read_i16::<BigEndian>()?,
            panose: {
                let mut panose = [0u8; 10];
                reader.read_exact(&mut panose)?;
                panose
            },
            ulUnicodeRange: [
                reader.read_u32::<BigEndian>()?,
                reader.read_u32::<BigEndian>()?,
                reader.read_u32::<BigEndian>()?,
                reader.read_u32::<BigEndian>()?,
            ],
            achVendID: {
                let mut vend_id = [0u8; 4];
                reader.read_exact(&mut vend_id)?;
                vend_id
            },
            fsSelection: reader.read_u16::<BigEndian>()?,
            usFirstCharIndex: reader.read_u16::<BigEndian>()?,
            usLastCharIndex: reader.read_u16::<BigEndian>()?,
            sTypoAscender: reader.read_i16::<BigEndian>()?,
            sTypoDescender: reader.read_i16::<BigEndian>()?,
            sTypoLineGap: reader.read_i16::<BigEndian>()?,
            usWinAscent: reader.read_u16::<BigEndian>()?,
            usWinDescent: reader.read_u16::<BigEndian>()?,
        })
    }

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), FontIoError> {
        dest.write_u16::<BigEndian>(self.version)?;
        dest.write_i16::<BigEndian>(self.xAvgCharWidth)?;
        dest.write_u16::<BigEndian>(self.usWeightClass)?;
        dest.write_u16::<BigEndian>(self.usWidthClass)?;
        dest.write_u16::<BigEndian>(self.fsType)?;
        dest.write_i16::<BigEndian>(self.ySubscriptXSize)?;
        dest.write_i16::<BigEndian>(self.ySubscriptYSize)?;
        dest.write_i16::<BigEndian>(self.ySubscriptXOffset)?;
        dest.write_i16::<BigEndian>(self.ySubscriptYOffset)?;
        dest.write_i16::<BigEndian>(self.ySuperscriptXSize)?;
        dest.write_i16::<BigEndian>(self.ySuperscriptYSize)?;
        dest.write_i16::<BigEndian>(self.ySuperscriptXOffset)?;
        dest.write_i16::<BigEndian>(self.ySuperscriptYOffset)?;
        dest.write_i16::<BigEndian>(self.yStrikeoutSize)?;
        dest.write_i16::<BigEndian>(self.yStrikeoutPosition)?;
        dest.write_i16::<BigEndian>(self.sFamilyClass)?;
        dest.write_all(&self.panose)?;
        for range in self.ulUnicodeRange {
            dest.write_u32::<BigEndian>(range)?;
        }
        dest.write_all(&self.achVendID)?;
        dest.write_u16::<BigEndian>(self.fsSelection)?;
        dest.write_u16::<BigEndian>(self.usFirstCharIndex)?;
        dest.write_u16::<BigEndian>(self.usLastCharIndex)?;
        dest.write_i16::<BigEndian>(self.sTypoAscender)?;
        dest.write_i16::<BigEndian>(self.sTypoDescender)?;
        dest.write_i16::<BigEndian>(self.sTypoLineGap)?;
        dest.write_u16::<BigEndian>(self.usWinAscent)?;
        dest.write_u16::<BigEndian>(self.usWinDescent)?;
        Ok(())
    }
}

/// Fields added in version 1 (code page coverage).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Os2V1 {
    pub ulCodePageRange1: u32,
    pub ulCodePageRange2: u32,
}

/// Fields added in versions 2 through 4.
#[derive(Clone, Copy, Debug, Default)]
#[allow(non_snake_case)]
pub(crate) struct Os2V2to4 {
    pub sxHeight: i16,
    pub sCapHeight: i16,
    pub usDefaultChar: u16,
    pub usBreakChar: u16,
    pub usMaxContext: u16,
}

/// Fields added in version 5 (optical point size range).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Os2V5 {
    pub us_lower_optical_point_size: u16,
    pub us_upper_optical_point_size: u16,
}

/// 'OS/2' font table: OS/2-and-Windows-specific metrics.
#[derive(Clone, Debug)]
pub(crate) struct TableOs2 {
    pub base: Os2Base,
    pub v1: Option<Os2V1>,
    pub v2_to_4: Option<Os2V2to4>,
    pub v5: Option<Os2V5>,
}

impl FontDataExactRead for TableOs2 {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        if size < Os2Base::SIZE {
            return Err(FontIoError::InvalidFormat(format!(
                "OS/2 table too short: expected at least {}, got {size}",
                Os2Base::SIZE
            )));
        }
        let base = Os2Base::from_reader(reader)?;
        let mut remaining = size - Os2Base::SIZE;

        let v1 = if remaining >= 8 {
            remaining -= 8;
            Some(Os2V1 {
                ulCodePageRange1: reader.read_u32::<BigEndian>()?,
                ulCodePageRange2: reader.read_u32::<BigEndian>()?,
            })
        } else {
            None
        };

        let v2_to_4 = if v1.is_some() && remaining >= 10 {
            remaining -= 10;
            Some(Os2V2to4 {
                sxHeight: reader.read_i16::<BigEndian>()?,
                sCapHeight: reader.read_i16::<BigEndian>()?,
                usDefaultChar: reader.read_u16::<BigEndian>()?,
                usBreakChar: reader.read_u16::<BigEndian>()?,
                usMaxContext: reader.read_u16::<BigEndian>()?,
            })
        } else {
            None
        };

        let v5 = if v2_to_4.is_some() && remaining >= 4 {
            Some(Os2V5 {
                us_lower_optical_point_size: reader.read_u16::<BigEndian>()?,
                us_upper_optical_point_size: reader.read_u16::<BigEndian>()?,
            })
        } else {
            None
        };

        Ok(Self {
            base,
            v1,
            v2_to_4,
            v5,
        })
    }
}

impl FontDataWrite for TableOs2 {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        self.base.write(dest)?;
        if let Some(v1) = &self.v1 {
            dest.write_u32::<BigEndian>(v1.ulCodePageRange1)?;
            dest.write_u32::<BigEndian>(v1.ulCodePageRange2)?;
        }
        if let Some(v2_to_4) = &self.v2_to_4 {
            dest.write_i16::<BigEndian>(v2_to_4.sxHeight)?;
            dest.write_i16::<BigEndian>(v2_to_4.sCapHeight)?;
            dest.write_u16::<BigEndian>(v2_to_4.usDefaultChar)?;
            dest.write_u16::<BigEndian>(v2_to_4.usBreakChar)?;
            dest.write_u16::<BigEndian>(v2_to_4.usMaxContext)?;
        }
        if let Some(v5) = &self.v5 {
            dest.write_u16::<BigEndian>(v5.us_lower_optical_point_size)?;
            dest.write_u16::<BigEndian>(v5.us_upper_optical_point_size)?;
        }
        Ok(())
    }
}

impl FontDataChecksum for TableOs2 {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableOs2 {
    fn len(&self) -> u32 {
        let mut len = Os2Base::SIZE;
        if self.v1.is_some() {
            len += 8;
        }
        if self.v2_to_4.is_some() {
            len += 10;
        }
        if self.v5.is_some() {
            len += 4;
        }
        len as u32
    }
}

#[cfg(test)]
#[path = "os2_test.rs"]
mod tests;
