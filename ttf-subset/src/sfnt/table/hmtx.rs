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

//! 'hmtx' SFNT table.
//!
//! Unlike most tables, 'hmtx' cannot be parsed from its own bytes alone: it
//! needs `hhea.numberOfHMetrics` and `maxp.numGlyphs` to know where the
//! dense metric array ends and the left-side-bearing-only tail begins. So
//! this table does not implement [`crate::FontDataExactRead`] and is instead
//! parsed explicitly by the font aggregate once those two values are known.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils, FontDataChecksum, FontDataWrite, FontTable,
};

/// A single horizontal metrics record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LongHorMetric {
    pub advance_width: u16,
    pub lsb: i16,
}

/// 'hmtx' font table: per-glyph advance widths and left side bearings.
#[derive(Clone, Debug)]
pub(crate) struct TableHmtx {
    /// Dense `{advanceWidth, lsb}` pairs, one per glyph up to
    /// `hhea.numberOfHMetrics`.
    pub h_metrics: Vec<LongHorMetric>,
    /// Left side bearings for glyphs beyond `hhea.numberOfHMetrics`, which
    /// all share the advance width of the final `h_metrics` entry.
    pub left_side_bearings: Vec<i16>,
}

impl TableHmtx {
    pub(crate) fn from_reader_with_counts<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
        number_of_h_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, FontIoError> {
        reader.seek(SeekFrom::Start(offset))?;
        let tail_count = num_glyphs.saturating_sub(number_of_h_metrics);
        let expected_size =
            4 * number_of_h_metrics as usize + 2 * tail_count as usize;
        if size < expected_size {
            return Err(FontIoError::InvalidFormat(format!(
                "hmtx table too short: expected at least {expected_size} bytes, got {size}"
            )));
        }
        let mut h_metrics = Vec::with_capacity(number_of_h_metrics as usize);
        for _ in 0..number_of_h_metrics {
            h_metrics.push(LongHorMetric {
                advance_width: reader.read_u16::<BigEndian>()?,
                lsb: reader.read_i16::<BigEndian>()?,
            });
        }
        let mut left_side_bearings = Vec::with_capacity(tail_count as usize);
        for _ in 0..tail_count {
            left_side_bearings.push(reader.read_i16::<BigEndian>()?);
        }
        Ok(Self {
            h_metrics,
            left_side_bearings,
        })
    }

    /// The advance width that applies to glyph `gid`, following the
    /// trailing-entries-inherit-the-last-advance rule.
    pub(crate) fn advance_width(&self, gid: u16) -> Option<u16> {
        if (gid as usize) < self.h_metrics.len() {
            Some(self.h_metrics[gid as usize].advance_width)
        } else if !self.h_metrics.is_empty() {
            self.h_metrics.last().map(|m| m.advance_width)
        } else {
            None
        }
    }

    /// Rebuilds this table for a font with `new_num_glyphs` glyphs, keeping
    /// metrics for the glyphs that survive and re-running the trailing-
    /// equal-advance optimizer so `numberOfHMetrics` stays as small as
    /// possible. Returns the rebuilt table and its new `numberOfHMetrics`.
    pub(crate) fn rebuild_for_glyph_count(
        &self,
        new_num_glyphs: u16,
    ) -> (Self, u16) {
        let mut advances = Vec::with_capacity(new_num_glyphs as usize);
        let mut lsbs = Vec::with_capacity(new_num_glyphs as usize);
        for gid in 0..new_num_glyphs {
            let (advance, lsb) = if (gid as usize) < self.h_metrics.len() {
                let m = self.h_metrics[gid as usize];
                (m.advance_width, m.lsb)
            } else {
                let advance =
                    self.h_metrics.last().map(|m| m.advance_width).unwrap_or(0);
                let tail_index = gid as usize - self.h_metrics.len();
                let lsb = self
                    .left_side_bearings
                    .get(tail_index)
                    .copied()
                    .unwrap_or(0);
                (advance, lsb)
            };
            advances.push(advance);
            lsbs.push(lsb);
        }

        // Trim trailing entries whose advance matches the final one into
        // lsb-only entries, mirroring the source font's own optimization.
        let mut number_of_h_metrics = advances.len();
        if let Some(&last_advance) = advances.last() {
            while number_of_h_metrics > 1
                && advances[number_of_h_metrics - 2] == last_advance
            {
                number_of_h_metrics -= 1;
            }
        }

        let h_metrics = (0..number_of_h_metrics)
            .map(|i| LongHorMetric {
                advance_width: advances[i],
                lsb: lsbs[i],
            })
            .collect();
        let left_side_bearings = lsbs[number_of_h_metrics..].to_vec();

        (
            Self {
                h_metrics,
                left_side_bearings,
            },
            number_of_h_metrics as u16,
        )
    }
}

impl FontDataWrite for TableHmtx {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        for metric in &self.h_metrics {
            dest.write_u16::<BigEndian>(metric.advance_width)?;
            dest.write_i16::<BigEndian>(metric.lsb)?;
        }
        for lsb in &self.left_side_bearings {
            dest.write_i16::<BigEndian>(*lsb)?;
        }
        Ok(())
    }
}

impl FontDataChecksum for TableHmtx {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.write(&mut buf).expect("write to Vec is infallible");
        utils::checksum(&buf)
    }
}

impl FontTable for TableHmtx {
    fn len(&self) -> u32 {
        (4 * self.h_metrics.len() + 2 * self.left_side_bearings.len()) as u32
    }
}

#[cfg(test)]
#[path = "hmtx_test.rs"]
mod tests;
