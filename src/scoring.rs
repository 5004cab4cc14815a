// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Relevance scoring: field hierarchy plus position bonus.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! ## FIELD_DOMINANCE
//! The weight constants MUST satisfy, for adjacent tiers A > B:
//!
//! ```text
//! weight(A) - MAX_POSITION_BONUS > (weight(B) + MAX_POSITION_BONUS) * EXACT_MULTIPLIER
//! ```
//!
//! so that neither a position bonus nor the exact-match multiplier can promote
//! a match across a field tier. With the current values the tightest case is
//! tags vs description: `10 - 0.5 = 9.5 > (5 + 0.5) * 1.5 = 8.25`.
//!
//! ## CONSTANTS
//! - Title = 100.0, Tags = 10.0, Description = 5.0, Content = 1.0
//! - MAX_POSITION_BONUS = 0.5
//! - EXACT_MULTIPLIER = 1.5
//!
//! Changing any of these requires re-checking `dominance_holds` below.

use crate::types::FieldKind;

/// Largest bonus an early match position can add.
pub const MAX_POSITION_BONUS: f64 = 0.5;

/// Multiplier applied when a query term equals an indexed term exactly,
/// rather than merely prefixing it.
pub const EXACT_MULTIPLIER: f64 = 1.5;

/// Base weight for a field tier: Title (100) > Tags (10) > Description (5) >
/// Content (1).
///
/// Tags outrank descriptions because a tag is an explicit editorial claim
/// that the article is *about* the term.
pub fn field_weight(field: FieldKind) -> f64 {
    // INVARIANT: FIELD_DOMINANCE (see module docs)
    match field {
        FieldKind::Title => 100.0,
        FieldKind::Tags => 10.0,
        FieldKind::Description => 5.0,
        FieldKind::Content => 1.0,
    }
}

/// Bonus for matches earlier in a field, in `[0, MAX_POSITION_BONUS]`.
///
/// Monotone: an earlier token position never gets a smaller bonus.
pub fn position_bonus(position: usize, field_len: usize) -> f64 {
    if field_len == 0 {
        return 0.0;
    }
    MAX_POSITION_BONUS * (1.0 - (position.min(field_len) as f64 / field_len as f64))
}

/// Precomputed per-posting weight: field weight plus position bonus.
pub fn posting_weight(field: FieldKind, position: usize, field_len: usize) -> f64 {
    field_weight(field) + position_bonus(position, field_len)
}

/// Final score for a matched posting, folding in whether the query term was
/// an exact vocabulary hit or a bare prefix.
pub fn match_score(weight: f64, exact: bool) -> f64 {
    if exact {
        weight * EXACT_MULTIPLIER
    } else {
        weight
    }
}
