#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod format;
mod guide;
mod name;
mod service;
mod session;
mod statistics;
mod submission;
mod user;
mod workout;

pub use error::*;
pub use exercise::*;
pub use format::*;
pub use guide::*;
pub use name::*;
pub use service::*;
pub use session::*;
pub use statistics::*;
pub use submission::*;
pub use user::*;
pub use workout::*;
