//! Fuzz target for response formatting and heuristic extraction.
//!
//! Run with: cargo +nightly fuzz run fuzz_format
//!
//! Both paths are supposed to be total over any string input; this hunts for
//! panics in the regex extraction and fence-splitting logic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nrfdocs_core::enhance::ResultType;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for result_type in [
            ResultType::ApiReference,
            ResultType::CodeExample,
            ResultType::Both,
        ] {
            let _ = nrfdocs_core::format::format_response(s, result_type);
        }
        let _ = nrfdocs_core::extract::extract_content(s);
    }
});
