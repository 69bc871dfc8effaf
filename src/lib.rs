//! Country picker
//!
//! Searchable country selector for dial codes and nationalities, with a
//! terminal front end.
//!
//! The library follows a Pure Core / Impure Shell split: `model`,
//! `matching` and `state` are pure and tested without a terminal; `source`,
//! `config`, `logging` and `view` deal with files, the environment and the
//! terminal.

pub mod config;
pub mod logging;
pub mod matching;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
