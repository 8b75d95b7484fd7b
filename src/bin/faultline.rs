#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[path = "driver.rs"]
mod driver;

use std::{env, process::ExitCode};

fn main() -> ExitCode {
    match driver::parse(env::args_os()) {
        Ok(options) => driver::run(&options),
        Err(error) => driver::report_usage_error(&error),
    }
}
