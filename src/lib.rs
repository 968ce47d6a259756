//! Critter Engine - behavioral state machines for autonomous 2D agents
//!
//! Every critter perceives its surroundings through a single forward ray,
//! classifies what it sees, and moves through a fixed five-state behavioral
//! graph (Normal, Ally, Wall, Attack, Dead). Species differ only in the
//! movement policies they inject into the four live states.

pub mod core;
pub mod engine;
pub mod species;
pub mod world;
