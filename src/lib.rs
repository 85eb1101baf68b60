//! **holder** provides the type [`Holder`]: a container for zero or one
//! value, stored inline in storage of exactly the value's size and alignment.
//!
//! The held value is constructed, assigned over and dropped in place. An
//! empty holder constructs a new value directly in its storage; a present
//! holder assigns over the value it already has, so a held `Vec` or `String`
//! keeps its allocation across copy-assignment.
//!
//! Checked access ([`Holder::value`] and friends) reports [`BadAccess`] on
//! an empty holder. Unchecked access is available through `unsafe` methods.
//!
//! The holder package has the following cargo features:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; disable to use `no_std` instead.
//!
//! - `zeroize`
//!   - Optional
//!   - Implement `Zeroize` for Holder
//!
//! ## Rust Version
//!
//! This version of holder requires Rust 1.51 or later.
//!
#![doc(html_root_url="https://docs.rs/holder/0.1/")]
#![cfg_attr(not(feature="std"), no_std)]

#[cfg(feature="zeroize")]
extern crate zeroize;

#[cfg(not(feature="std"))]
extern crate core as std;

mod errors;
mod holder;

pub use crate::errors::BadAccess;
pub use crate::holder::Holder;
