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

//! 'maxp' SFNT table.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataExactRead,
    FontDataWrite, FontTable,
};

/// Version 1.0 'maxp' table, used by TrueType-outline fonts.
const VERSION_1_0: i32 = 0x0001_0000;
/// Version 0.5 'maxp' table, used by CFF-outline fonts wrapped in an sfnt
/// container. This engine does not subset CFF outlines, but still needs to
/// round-trip a version-0.5 'maxp' table verbatim.
const VERSION_0_5: i32 = 0x0000_5000;

/// 'maxp' font table: describes the maximum resource usage this font
/// requires of a rendering client.
#[derive(Clone, Debug)]
pub(crate) enum TableMaxp {
    /// Version 0.5, CFF-outline fonts: only `numGlyphs` is defined.
    Version05 {
        /// The number of glyphs in the font.
        num_glyphs: u16,
    },
    /// Version 1.0, TrueType-outline fonts: the full sizing field set.
    Version10 {
        /// The number of glyphs in the font.
        num_glyphs: u16,
        /// Maximum points in a non-composite glyph.
        max_points: u16,
        /// Maximum contours in a non-composite glyph.
        max_contours: u16,
        /// Maximum points in a composite glyph.
        max_component_points: u16,
        /// Maximum contours in a composite glyph.
        max_component_contours: u16,
        /// Maximum zones.
        max_zones: u16,
        /// Maximum points used in Z0.
        max_twilight_points: u16,
        /// Number of Storage Area locations.
        max_storage: u16,
        /// Number of FDEFs.
        max_function_defs: u16,
        /// Number of IDEFs.
        max_instruction_defs: u16,
        /// Maximum stack depth.
        max_stack_elements: u16,
        /// Maximum byte count for glyph instructions.
        max_size_of_instructions: u16,
        /// Maximum number of components referenced at the top level for any
        /// composite glyph.
        max_component_elements: u16,
        /// Maximum levels of recursion.
        max_component_depth: u16,
    },
}

impl TableMaxp {
    /// Size in bytes of a version 0.5 table.
    const SIZE_0_5: usize = 6;
    /// Size in bytes of a version 1.0 table.
    const SIZE_1_0: usize = 32;

    /// Returns the number of glyphs recorded in the table.
    pub(crate) fn num_glyphs(&self) -> u16 {
        match self {
            TableMaxp::Version05 { num_glyphs } => *num_glyphs,
            TableMaxp::Version10 { num_glyphs, .. } => *num_glyphs,
        }
    }

    /// Sets the number of glyphs recorded in the table. Used by the
    /// subsetter after pruning `glyf`. The other sizing fields in a version
    /// 1.0 table are best-effort and are not recomputed here; a consumer
    /// that regenerates hinting bytecode would need to revisit them.
    pub(crate) fn set_num_glyphs(&mut self, value: u16) {
        match self {
            TableMaxp::Version05 { num_glyphs } => *num_glyphs = value,
            TableMaxp::Version10 { num_glyphs, .. } => *num_glyphs = value,
        }
    }
}

impl FontDataExactRead for TableMaxp {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let version = reader.read_i32::<BigEndian>()?;
        match version {
            VERSION_0_5 => {
                if size < Self::SIZE_0_5 {
                    return Err(FontIoError::InvalidFormat(format!(
                        "maxp version 0.5 table too short: {size} bytes"
                    )));
                }
                Ok(TableMaxp::Version05 {
                    num_glyphs: reader.read_u16::<BigEndian>()?,
                })
            }
            VERSION_1_0 => {
                if size < Self::SIZE_1_0 {
                    return Err(FontIoError::InvalidFormat(format!(
                        "maxp version 1.0 table too short: {size} bytes"
                    )));
                }
                Ok(TableMaxp::Version10 {
                    num_glyphs: reader.read_u16::<BigEndian>()?,
                    max_points: reader.read_u16::<BigEndian>()?,
                    max_contours: reader.read_u16::<BigEndian>()?,
                    max_component_points: reader.read_u16::<BigEndian>()?,
                    max_component_contours: reader.read_u16::<BigEndian>()?,
                    max_zones: reader.read_u16::<BigEndian>()?,
                    max_twilight_points: reader.read_u16::<BigEndian>()?,
                    max_storage: reader.read_u16::<BigEndian>()?,
                    max_function_defs: reader.read_u16::<BigEndian>()?,
                    max_instruction_defs: reader.read_u16::<BigEndian>()?,
                    max_stack_elements: reader.read_u16::<BigEndian>()?,
                    max_size_of_instructions: reader.read_u16::<BigEndian>()?,
                    max_component_elements: reader.read_u16::<BigEndian>()?,
                    max_component_depth: reader.read_u16::<BigEndian>()?,
                })
            }
            other => Err(FontIoError::InvalidFormat(format!(
                "unsupported maxp version: {other:#010x}"
            ))),
        }
    }
}

impl FontDataWrite for TableMaxp {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        match self {
            TableMaxp::Version05 { num_glyphs } => {
                dest.write_i32::<BigEndian>(VERSION_0_5)?;
                dest.write_u16::<BigEndian>(*num_glyphs)?;
            }
            TableMaxp::Version10 {
                num_glyphs,
                max_points,
                max_contours,
                max_component_points,
                max_component_contours,
                max_zones,
                max_twilight_points,
                max_storage,
                max_function_defs,
                max_instruction_defs,
                max_stack_elements,
                max_size_of_instructions,
                max_component_elements,
                max_component_depth,
            } => {
                dest.write_i32::<BigEndian>(VERSION_1_0)?;
                dest.write_u16::<BigEndian>(*num_glyphs)?;
                dest.write_u16::<BigEndian>(*max_points)?;
                dest.write_u16::<BigEndian>(*max_contours)?;
                dest.write_u16::<BigEndian>(*max_component_points)?;
                dest.write_u16::<BigEndian>(*max_component_contours)?;
                dest.write_u16::<BigEndian>(*max_zones)?;
                dest.write_u16::<BigEndian>(*max_twilight_points)?;
                dest.write_u16::<BigEndian>(*max_storage)?;
                dest.write_u16::<BigEndian>(*max_function_defs)?;
                dest.write_u16::<BigEndian>(*max_instruction_defs)?;
                dest.write_u16::<BigEndian>(*max_stack_elements)?;
                dest.write_u16::<BigEndian>(*max_size_of_instructions)?;
                dest.write_u16::<BigEndian>(*max_component_elements)?;
                dest.write_u16::<BigEndian>(*max_component_depth)?;
            }
        }
        Ok(())
    }
}

impl FontDataChecksum for TableMaxp {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(Self::SIZE_1_0);
        // FontDataWrite::write cannot fail writing into a Vec.
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableMaxp {
    fn len(&self) -> u32 {
        match self {
            TableMaxp::Version05 { .. } => Self::SIZE_0_5 as u32,
            TableMaxp::Version10 { .. } => Self::SIZE_1_0 as u32,
        }
    }
}

#[cfg(test)]
#[path = "maxp_test.rs"]
mod tests;
