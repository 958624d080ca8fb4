//! The life-cycle contract every game engine implements.
//!
//! Hosts drive engines through `MiniGame`: start a session, forward player
//! actions through each engine's own methods, advance time, and re-read the
//! snapshot after every call.

pub mod engine;

pub use engine::MiniGame;
