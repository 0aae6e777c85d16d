// src/core/mod.rs

pub mod dom;
pub mod ident;
pub mod net;
pub mod sanitize;
