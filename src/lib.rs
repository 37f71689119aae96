//! All things NDN certificates.
//!
//! _Named Data Networking_ (NDN) retrieves data by name rather than by
//! the address of the host holding it. Every piece of data is signed, and
//! the keys used for signing are published as certificates which are
//! named data themselves.
//!
//! This crate contains the certificate codec in [`cert`] together with the
//! pieces needed around it: names and named data in [`name`] and [`data`],
//! signing and signature checking in [`crypto`] and [`validator`], and a
//! minimal in-process transport in [`face`]. The [`encyclopedia`] module
//! contains a small sample application built from all of these.

pub mod cert;
pub mod crypto;
pub mod data;
pub mod encyclopedia;
pub mod error;
pub mod face;
pub mod name;
pub mod oid;
pub mod validator;
pub mod x509;

mod util;
