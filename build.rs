//! This build script copies the `memory.x` file from the crate root into
//! a directory where the linker can always find it at build time.
//! The firmware lives in a workspace next to the host-tested core crate, so
//! the linker can't rely on finding `memory.x` in the project root.
//! Cargo re-runs this script whenever `memory.x` changes, which rebuilds the
//! application with the new memory settings.

#![allow(clippy::expect_used)]

use std::{env, fs, path::PathBuf};

fn main() {
    memory_x();
}

/// Handle the `memory.x` linker script
fn memory_x() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR environment variable not set"));
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("Could not write memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    // only re-run when the memory layout changes
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
