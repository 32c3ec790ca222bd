//! White balance calibration module
//!
//! Derives per-channel gains from the expected-white control patch and
//! applies them to the other samples, normalizing out ambient color cast.

pub mod white_balance;

pub use white_balance::WhiteBalance;
