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

//! 'prep' SFNT table: the Control Value Program, hinting bytecode run once
//! per point size change. This engine never executes or validates the
//! bytecode, only preserves it verbatim.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// 'prep' font table.
#[derive(Clone, Debug, Default)]
pub(crate) struct TablePrep {
    pub instructions: Vec<u8>,
}

impl FontDataExactRead for TablePrep {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let mut instructions = vec![0u8; size];
        reader.read_exact(&mut instructions)?;
        Ok(Self { instructions })
    }
}

impl FontDataWrite for TablePrep {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_all(&self.instructions)?;
        Ok(())
    }
}

impl FontDataChecksum for TablePrep {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        utils::checksum(&self.instructions)
    }
}

impl FontTable for TablePrep {
    fn len(&self) -> u32 {
        self.instructions.len() as u32
    }
}

#[cfg(test)]
#[path = "prep_test.rs"]
mod tests;
