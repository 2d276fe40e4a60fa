// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform operations — elementwise maps, histogram, and chroma key.

pub mod chroma_key;
pub mod elementwise;
pub mod histogram;
pub mod pixel;
