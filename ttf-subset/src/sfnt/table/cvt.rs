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

//! 'cvt ' SFNT table: the Control Value Table read by hinting bytecode.
//! This engine never interprets the values, only preserves them verbatim.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// 'cvt ' font table.
#[derive(Clone, Debug, Default)]
pub(crate) struct TableCvt {
    pub values: Vec<i16>,
}

impl FontDataExactRead for TableCvt {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        if size % 2 != 0 {
            return Err(FontIoError::InvalidFormat(format!(
                "cvt table size is not a multiple of 2: {size}"
            )));
        }
        let mut values = Vec::with_capacity(size / 2);
        for _ in 0..(size / 2) {
            values.push(reader.read_i16::<BigEndian>()?);
        }
        Ok(Self { values })
    }
}

impl FontDataWrite for TableCvt {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        for value in &self.values {
            dest.write_i16::<BigEndian>(*value)?;
        }
        Ok(())
    }
}

impl FontDataChecksum for TableCvt {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableCvt {
    fn len(&self) -> u32 {
        (self.values.len() * 2) as u32
    }
}

#[cfg(test)]
#[path = "cvt_test.rs"]
mod tests;
