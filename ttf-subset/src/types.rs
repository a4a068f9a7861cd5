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

//! Small newtypes for the fixed-point and identifier quantities that recur
//! across several SFNT tables.

use std::io::{Read, Seek, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{error::FontIoError, FontDataRead, FontDataWrite};

/// A 16.16 fixed-point number, as used by `head.fontRevision` and several
/// other tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fixed(pub i32);

impl FontDataRead for Fixed {
    type Error = FontIoError;

    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error> {
        Ok(Self(reader.read_i32::<BigEndian>()?))
    }
}

impl FontDataWrite for Fixed {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_i32::<BigEndian>(self.0)?;
        Ok(())
    }
}

/// A 2.14 fixed-point number, as used by composite glyph scale components
/// and `post.italicAngle`-adjacent values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct F2Dot14(pub i16);

impl F2Dot14 {
    /// Converts this value to a floating-point representation.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 16384.0
    }
}

impl FontDataRead for F2Dot14 {
    type Error = FontIoError;

    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error> {
        Ok(Self(reader.read_i16::<BigEndian>()?))
    }
}

impl FontDataWrite for F2Dot14 {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_i16::<BigEndian>(self.0)?;
        Ok(())
    }
}

/// Seconds since 1904-01-01T00:00:00Z, as used by `head.created`/`modified`.
pub type LongDateTime = i64;

/// A glyph identifier (GID). `0` is reserved for `.notdef`.
pub type GlyphIndex = u16;
