// build.rs

//! Compiles the command schemas under `commands/` into type-state builders.

#[path = "codegen/mod.rs"]
mod codegen;

use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=commands");
    println!("cargo:rerun-if-changed=codegen");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    codegen::run(&manifest_dir.join("commands"), &out_dir)
}
