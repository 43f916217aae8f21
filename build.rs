use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[path = "src/utils/shared_checks.rs"]
mod shared_checks;

const SHARED_CONSTANTS: &str = "shared/constants.toml";

#[derive(Debug, Deserialize)]
struct SharedConstants {
    identity: Identity,
    console: Console,
    sampleheap: SampleHeap,
}

#[derive(Debug, Deserialize)]
struct Identity {
    version: String,
    release_date: String,
}

#[derive(Debug, Deserialize)]
struct Console {
    port: u32,
}

#[derive(Debug, Deserialize)]
struct SampleHeap {
    newline: u64,
}

fn main() {
    println!("cargo:rerun-if-changed={}", SHARED_CONSTANTS);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/utils/shared_checks.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let content = fs::read_to_string(SHARED_CONSTANTS)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", SHARED_CONSTANTS, e));
    let shared: SharedConstants = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", SHARED_CONSTANTS, e));

    check(&shared);

    fs::write(out_dir.join("constants.rs"), render_rust(&shared))
        .expect("failed to write constants.rs");
    fs::write(
        out_dir.join("sampleheap_constants.h"),
        render_header(&shared),
    )
    .expect("failed to write sampleheap_constants.h");
}

fn check(shared: &SharedConstants) {
    if let Err(reason) = shared_checks::check_version(&shared.identity.version) {
        panic!("identity.version: {}", reason);
    }
    if let Err(reason) = shared_checks::check_release_date(&shared.identity.release_date) {
        panic!("identity.release_date: {}", reason);
    }
    if let Err(reason) = shared_checks::check_port(shared.console.port) {
        panic!("console.port: {}", reason);
    }
    if let Err(reason) = shared_checks::check_newline(shared.sampleheap.newline) {
        panic!("sampleheap.newline: {}", reason);
    }
}

fn render_rust(shared: &SharedConstants) -> String {
    format!(
        "/// Current version of Scalene; reported by --version.\n\
         pub const SCALENE_VERSION: &str = {:?};\n\
         /// Release date paired with [`SCALENE_VERSION`].\n\
         pub const SCALENE_DATE: &str = {:?};\n\
         /// Port the web console binds to.\n\
         pub const SCALENE_PORT: u16 = {};\n\
         /// Rollover count compiled into the native sampling heap.\n\
         pub const SAMPLEHEAP_NEWLINE: u64 = {};\n",
        shared.identity.version,
        shared.identity.release_date,
        shared.console.port,
        shared.sampleheap.newline,
    )
}

fn render_header(shared: &SharedConstants) -> String {
    format!(
        "// Generated from {} by the scalene-config build script. Do not edit.\n\
         #pragma once\n\
         \n\
         #define SCALENE_SAMPLEHEAP_NEWLINE {}\n",
        SHARED_CONSTANTS, shared.sampleheap.newline,
    )
}
