#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! A small command-dispatch framework and the `demo` tree built on it.
//!
//! - [`command`]: owned command nodes, typed flags, help rendering and the
//!   dispatcher ([`command::Command::execute`]).
//! - [`commands`]: the fixed `demo` / `hello` / `hullo` tree.
//! - [`output`]: the line-prefixing writer used for the real streams.
//! - [`config`]: environment-driven settings and tracing setup.

pub mod command;
pub mod commands;
pub mod config;
pub mod output;
