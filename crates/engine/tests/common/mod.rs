//! Shared infrastructure for engine tests.


/// Address-stream construction and engine-driving helpers.
pub mod stream;
