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

//! SFNT font file table.

pub(crate) mod cmap;
pub(crate) mod cvt;
pub(crate) mod generic;
pub(crate) mod glyf;
pub(crate) mod head;
pub(crate) mod hhea;
pub(crate) mod hmtx;
pub(crate) mod loca;
pub(crate) mod maxp;
pub(crate) mod name;
pub(crate) mod named_table;
pub(crate) mod os2;
pub(crate) mod post;
pub(crate) mod prep;

// Export head table
pub use head::TableHead;
// Export named table
pub use named_table::NamedTable;
