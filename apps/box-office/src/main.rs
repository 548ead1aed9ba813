//! # Box Office Binary
//!
//! All logic lives in the `box_office` library.

use std::process::ExitCode;

fn main() -> ExitCode {
    box_office::run()
}
