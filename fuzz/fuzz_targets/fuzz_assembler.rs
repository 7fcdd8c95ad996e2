//! Fuzz target for the assembler.
//!
//! Feeds arbitrary strings to the assembler to find edge cases and panics in
//! tokenization, parsing and label resolution.

#![no_main]

use lib8bit::assemble;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Errors are expected on garbage input - only panics count
        if let Ok(output) = assemble(source) {
            // Whatever assembles must uphold the image invariant
            assert_eq!(output.image.as_bytes().len(), 256);

            // Every mapped address must point at a real statement
            for (_, index) in output.statement_map.iter() {
                assert!(index < output.statements.len());
            }
        }
    }
});
