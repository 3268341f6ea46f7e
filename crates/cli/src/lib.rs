#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod config;
pub mod log;
