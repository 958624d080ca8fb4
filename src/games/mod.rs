//! The four game engines.

pub mod arithmetic;
pub mod rhythm;
pub mod sequence;
pub mod words;
