//! Terminal front end for the email verifier.
pub mod platform;
