// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural verification of a built engine.
//!
//! Nothing in the hot path calls this. Indexing keeps the invariants by
//! construction, and `debug_assert!`s catch regressions while tests run.
//! `check_well_formed` is the slow, exhaustive walk used where the data came
//! from somewhere we don't control (a snapshot on disk) and by the property
//! tests.

mod types;

pub use types::*;
