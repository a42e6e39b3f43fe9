#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod cached_rest;
pub mod document;
pub mod file;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;
