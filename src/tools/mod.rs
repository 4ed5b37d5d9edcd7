//! The tools module provides the helpers around the huffzip codec.
//!
//! The tools are:
//! - cli: Command line interface and the options it fills in.
//! - file_io: Reading inputs and writing outputs without leaving partial files.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod file_io;
pub mod freq_count;
