// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snapshot decoding.
//!
//! Random bytes must be rejected with an error. Anything that does decode has
//! already passed the structural checks, so it must answer a query.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wikidex::snapshot;

fuzz_target!(|data: &[u8]| {
    if let Ok(engine) = snapshot::from_bytes(data) {
        let _ = engine.solve_query("a OR NOT a");
    }
});
