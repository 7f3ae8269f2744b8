//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! cmdopts - POSIX/GNU-style command-line option parsing and dispatch.
//!
//! A parser instance owns an immutable registry of recognized options
//! (short switches, long options, argument options, joined KEY=VALUE
//! switches), a set of cross-option constraints, and an exit-code policy.
//! `CommandParser::run` turns one argument vector into an `Execution`:
//! resolved option values, operands, an exit code, and the stdout/stderr
//! line buffers the fixture programs replay to their process streams.

mod constraint;
mod dispatch;
pub mod error;
mod help;
mod option;
mod scan;

pub use constraint::Constraint;
pub use dispatch::{CommandParser, Execution};
pub use error::{Error, Result};
pub use option::OptionSpec;

pub const PROJECT_NAME: &'static str = "cmdopts-rs";
