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

//! Font subsetting.
//!
//! Three operations, all implemented in terms of [`subset_keep_indices`]:
//! keeping an explicit glyph index set (transitively closed over composite
//! glyph references), resolving a rune list through the font's cmap first,
//! and keeping a dense glyph-index prefix (the only mode that can also
//! shrink `numGlyphs` and regenerate `cmap`/`post`).

use std::collections::BTreeSet;

use crate::{
    error::{FontIoError, FontSubsetError},
    sfnt::{
        directory::SfntDirectory,
        font::SfntFont,
        table::{glyf::TableGlyf, NamedTable},
    },
    tag::FontTag,
};

/// Preferred (platformID, encodingID) order for resolving runes to glyph
/// indices: Windows BMP/full Unicode, then classic Unicode, then Mac Roman.
const CMAP_PREFERENCE_ORDER: [(u16, u16); 3] = [(3, 1), (1, 0), (0, 3)];

/// Retains only `indices`, plus, recursively, any composite glyph
/// components they reference, without changing `numGlyphs`. Glyphs not
/// kept are zeroed (their `loca` entry becomes a zero-length run); GIDs
/// keep their original meaning.
pub(crate) fn subset_keep_indices(
    font: &SfntFont,
    indices: &BTreeSet<u16>,
) -> Result<SfntFont, FontIoError> {
    let glyf = font.glyf()?;
    let num_glyphs = font.num_glyphs()?;

    for &index in indices {
        if index >= num_glyphs {
            return Err(FontSubsetError::GlyphIndexOutOfRange(index as u32).into());
        }
    }

    let mut closure: BTreeSet<u16> = indices.clone();
    let mut frontier: Vec<u16> = indices.iter().copied().collect();
    while let Some(gid) = frontier.pop() {
        let Some(desc) = glyf.descs.get(gid as usize) else {
            continue;
        };
        for component in desc.component_glyph_indices() {
            if closure.insert(component) {
                frontier.push(component);
            }
        }
    }

    tracing::debug!(
        requested = indices.len(),
        kept_with_components = closure.len(),
        "subsetting font by glyph index"
    );

    let mut new_descs = Vec::with_capacity(glyf.descs.len());
    for (gid, desc) in glyf.descs.iter().enumerate() {
        if closure.contains(&(gid as u16)) {
            new_descs.push(desc.clone());
        } else {
            new_descs.push(Default::default());
        }
    }

    rebuild_font(font, TableGlyf { descs: new_descs }, num_glyphs)
}

/// Resolves each rune to a glyph index via the first matching cmap
/// subtable in `(3,1)`, `(1,0)`, `(0,3)` order, then delegates to
/// [`subset_keep_indices`].
pub(crate) fn subset_keep_runes(
    font: &SfntFont,
    runes: &[u32],
) -> Result<SfntFont, FontIoError> {
    let cmap = font.cmap()?;

    let subtable = CMAP_PREFERENCE_ORDER
        .iter()
        .find_map(|&(platform_id, encoding_id)| {
            cmap.subtable(platform_id, encoding_id)
        });

    let mut indices = BTreeSet::new();
    for &rune in runes {
        let gid = subtable
            .map(|st| st.cmap())
            .and_then(|map| map.get(&rune).copied())
            .filter(|&gid| gid != 0);
        match gid {
            Some(gid) => {
                indices.insert(gid);
            }
            None => return Err(FontSubsetError::RuneNotFound(rune).into()),
        }
    }

    tracing::debug!(
        runes = runes.len(),
        glyphs = indices.len(),
        "subsetting font by rune list"
    );

    subset_keep_indices(font, &indices)
}

/// Keeps only the first `num_glyphs` glyph indices (a dense prefix),
/// shrinking `maxp.numGlyphs` and regenerating every table that is keyed
/// on glyph count: `hmtx`, `loca`, `glyf`, `post` and `cmap`.
///
/// Composite glyphs within the kept prefix that reference components
/// outside it cannot be repaired by a dense-prefix cut (unlike
/// [`subset_keep_indices`], there is no room to transitively pull those
/// components in without changing what any glyph index means), so they
/// are zeroed instead of kept dangling.
pub(crate) fn subset_simple(
    font: &SfntFont,
    num_glyphs: u16,
) -> Result<SfntFont, FontIoError> {
    let current_num_glyphs = font.num_glyphs()?;
    if num_glyphs >= current_num_glyphs {
        return Err(FontSubsetError::Redundant(format!(
            "requested {num_glyphs} glyphs, font already has {current_num_glyphs}"
        ))
        .into());
    }

    let glyf = font.glyf()?;
    let mut new_descs = Vec::with_capacity(num_glyphs as usize);
    for (gid, desc) in glyf.descs.iter().take(num_glyphs as usize).enumerate() {
        let keep = desc
            .component_glyph_indices()
            .iter()
            .all(|&component| component < num_glyphs);
        if keep {
            new_descs.push(desc.clone());
        } else {
            tracing::warn!(
                gid,
                "zeroing composite glyph with component outside subset prefix"
            );
            new_descs.push(Default::default());
        }
    }

    tracing::debug!(
        from = current_num_glyphs,
        to = num_glyphs,
        "subsetting font to a dense glyph prefix"
    );

    let mut result =
        rebuild_font(font, TableGlyf { descs: new_descs }, num_glyphs)?;

    if let Some(NamedTable::Cmap(cmap)) = result.tables.get(&FontTag::CMAP) {
        let rebuilt = cmap.rebuild_for_prefix(num_glyphs);
        result.tables.insert(FontTag::CMAP, NamedTable::Cmap(rebuilt));
    }
    if let Some(NamedTable::Post(post)) = result.tables.get_mut(&FontTag::POST) {
        post.truncate_to(num_glyphs);
    }
    if let Some(NamedTable::Maxp(maxp)) = result.tables.get_mut(&FontTag::MAXP) {
        maxp.set_num_glyphs(num_glyphs);
    }

    Ok(result)
}

/// Shared tail of every subset operation: given a pruned `glyf` table and
/// the glyph count it still claims to have, rebuilds `loca` (preserving the
/// original base offset) and `hmtx` (re-running the trailing-equal-advance
/// optimizer), and returns the new font with every other table carried
/// through unchanged. The header and directory are placeholders; both are
/// fully recomputed the next time the font is written.
fn rebuild_font(
    font: &SfntFont,
    new_glyf: TableGlyf,
    num_glyphs: u16,
) -> Result<SfntFont, FontIoError> {
    let new_loca = font.loca()?.rebuild_from_lengths(&new_glyf.lengths());
    let (new_hmtx, new_number_of_h_metrics) =
        font.hmtx()?.rebuild_for_glyph_count(num_glyphs);

    let mut tables = font.tables.clone();
    tables.insert(FontTag::GLYF, NamedTable::Glyf(new_glyf));
    tables.insert(FontTag::LOCA, NamedTable::Loca(new_loca));
    tables.insert(FontTag::HMTX, NamedTable::Hmtx(new_hmtx));
    if let Some(NamedTable::Hhea(hhea)) = tables.get_mut(&FontTag::HHEA) {
        hhea.numberOfHMetrics = new_number_of_h_metrics;
    }

    Ok(SfntFont::from_tables(font.header, SfntDirectory::new(), tables))
}

#[cfg(test)]
#[path = "subset_test.rs"]
mod tests;
