//! Constants shared with the rest of the profiler and its native allocator.
//!
//! The literal values live in `shared/constants.toml`. The build script turns
//! that file into the Rust constants below and into `sampleheap_constants.h`,
//! which the native sampling heap includes, so both artifacts read one
//! definition.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

/// Sample count at which the managed side expects the allocator to emit a
/// newline. Always `SAMPLEHEAP_NEWLINE - 1`.
pub const NEWLINE_TRIGGER_LENGTH: u64 = SAMPLEHEAP_NEWLINE - 1;

/// The generated C/C++ header, embedded for tooling that writes or checks it.
pub const NATIVE_HEADER: &str =
    include_str!(concat!(env!("OUT_DIR"), "/sampleheap_constants.h"));

/// Name of the rollover macro in [`NATIVE_HEADER`].
pub const NATIVE_NEWLINE_MACRO: &str = "SCALENE_SAMPLEHEAP_NEWLINE";

const _: () = assert!(NEWLINE_TRIGGER_LENGTH + 1 == SAMPLEHEAP_NEWLINE);
const _: () = assert!(SCALENE_PORT != 0);
