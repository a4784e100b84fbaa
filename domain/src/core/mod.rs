//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: the text a user asked

pub mod question;
