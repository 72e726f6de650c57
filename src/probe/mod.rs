// src/probe/mod.rs
mod runner;

pub use runner::{ProbeError, ProbeResult, ProbeRunner, ShellRunner};
