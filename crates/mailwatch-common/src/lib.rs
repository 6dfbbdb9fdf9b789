//! MailWatch Common - shared primitives for the email DLP monitor
//!
//! This crate provides the pieces every other MailWatch crate leans on:
//! - Error handling (`MonitorError`, `MonitorResult`)
//! - Time source abstraction (`Clock`, `SystemClock`)

#![warn(missing_docs)]

pub mod clock;
pub mod error;

pub use clock::{Clock, SystemClock};
pub use error::{MonitorError, MonitorResult};
