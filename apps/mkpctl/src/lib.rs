//! # mkpctl
//!
//! Command-line front end for `mkp-core`: dataset discovery, CSV row
//! supply, configuration files, helper invocation and report rendering.

pub mod cli;
pub mod config;
pub mod helper;
pub mod source;
