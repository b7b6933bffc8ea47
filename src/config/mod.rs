//! JSON configuration files of the binaries.

pub mod dump;
pub mod run;
