/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library exposes methods for interacting with YAML
//! byte streams.
//!
//! It is currently still in development, and will likely
//! have multiple breaking changes to the exposed API before
//! stabilizing. Use at your own risk.
//!
//! The entry point is [`event::Parser`]: construct one from a
//! [`reader::Reader`] over your byte buffer, then pull
//! [`event::types::Event`]s from it one at a time, either via
//! [`event::Parser::next_event`] or by iterating the Parser
//! directly.
//!
//! ```no_run
//! use yamlet::{event::{flag::O_ZEROED, Parser}, reader::Reader};
//!
//! fn run() -> yamlet::Result<()>
//! {
//!     let reader = Reader::new(b"key: value\n").expect("valid encoding");
//!     let mut parser = Parser::new(reader, O_ZEROED);
//!
//!     while let Some(event) = parser.next_event()
//!     {
//!         let event = event?;
//!         // ...
//!     }
//!
//!     Ok(())
//! }
//! ```

#![allow(dead_code)]
#![allow(clippy::suspicious_else_formatting)]

pub mod encoding;
pub mod event;
pub mod mark;
pub mod reader;
pub mod token;

mod error;
mod queue;
mod scanner;

pub use error::{Category, Error, ErrorKind, Result};
