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

//! 'name' SFNT table: human-readable strings (family name, copyright, etc).
//! Subsetting never touches this table; it is carried through verbatim.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// A single name record: which (platform, encoding, language, name ID) a
/// string in the storage area belongs to.
#[derive(Copy, Clone, Debug)]
pub(crate) struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub length: u16,
    pub offset: u16,
}

/// A format-1 language-tag record.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LangTagRecord {
    pub length: u16,
    pub offset: u16,
}

/// 'name' font table.
#[derive(Clone, Debug)]
pub(crate) struct TableName {
    pub format: u16,
    pub name_records: Vec<NameRecord>,
    pub lang_tag_records: Vec<LangTagRecord>,
    /// Raw bytes of the string storage area, starting at `stringOffset`.
    pub storage: Vec<u8>,
}

impl FontDataExactRead for TableName {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let format = reader.read_u16::<BigEndian>()?;
        let count = reader.read_u16::<BigEndian>()?;
        let string_offset = reader.read_u16::<BigEndian>()?;

        let mut name_records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            name_records.push(NameRecord {
                platform_id: reader.read_u16::<BigEndian>()?,
                encoding_id: reader.read_u16::<BigEndian>()?,
                language_id: reader.read_u16::<BigEndian>()?,
                name_id: reader.read_u16::<BigEndian>()?,
                length: reader.read_u16::<BigEndian>()?,
                offset: reader.read_u16::<BigEndian>()?,
            });
        }

        let lang_tag_records = if format == 1 {
            let lang_tag_count = reader.read_u16::<BigEndian>()?;
            let mut records = Vec::with_capacity(lang_tag_count as usize);
            for _ in 0..lang_tag_count {
                records.push(LangTagRecord {
                    length: reader.read_u16::<BigEndian>()?,
                    offset: reader.read_u16::<BigEndian>()?,
                });
            }
            records
        } else {
            Vec::new()
        };

        if (string_offset as usize) > size {
            return Err(FontIoError::InvalidFormat(
                "name table stringOffset past end of table".into(),
            ));
        }
        let storage_len = size - string_offset as usize;
        let mut storage = vec![0u8; storage_len];
        reader.seek(SeekFrom::Start(offset + string_offset as u64))?;
        reader.read_exact(&mut storage)?;

        Ok(Self {
            format,
            name_records,
            lang_tag_records,
            storage,
        })
    }
}

impl TableName {
    /// The byte offset of the storage area relative to the start of the
    /// table, given the current record counts.
    fn string_offset(&self) -> u16 {
        let mut header_size = 6 + 12 * self.name_records.len();
        if self.format == 1 {
            header_size += 2 + 4 * self.lang_tag_records.len();
        }
        header_size as u16
    }
}

impl FontDataWrite for TableName {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_u16::<BigEndian>(self.format)?;
        dest.write_u16::<BigEndian>(self.name_records.len() as u16)?;
        dest.write_u16::<BigEndian>(self.string_offset())?;
        for record in &self.name_records {
            dest.write_u16::<BigEndian>(record.platform_id)?;
            dest.write_u16::<BigEndian>(record.encoding_id)?;
            dest.write_u16::<BigEndian>(record.language_id)?;
            dest.write_u16::<BigEndian>(record.name_id)?;
            dest.write_u16::<BigEndian>(record.length)?;
            dest.write_u16::<BigEndian>(record.offset)?;
        }
        if self.format == 1 {
            dest.write_u16::<BigEndian>(self.lang_tag_records.len() as u16)?;
            for record in &self.lang_tag_records {
                dest.write_u16::<BigEndian>(record.length)?;
                dest.write_u16::<BigEndian>(record.offset)?;
            }
        }
        dest.write_all(&self.storage)?;
        Ok(())
    }
}

impl FontDataChecksum for TableName {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableName {
    fn len(&self) -> u32 {
        self.string_offset() as u32 + self.storage.len() as u32
    }
}

#[cfg(test)]
#[path = "name_test.rs"]
mod tests;
