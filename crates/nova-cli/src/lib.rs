//! Library wrapper around the `nova` binary.
//!
//! `cargo test -p nova-cli --lib` typechecks and runs the flag-handling unit tests
//! without building the integration test binaries, so the binary crate root is
//! compiled here as a module as well.

#[allow(dead_code)]
#[path = "main.rs"]
mod main_bin;
