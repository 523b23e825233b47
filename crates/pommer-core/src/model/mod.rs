pub mod agent;
pub mod bomb;
pub mod cell;
pub mod direction;
pub mod grid;
pub mod item;
pub mod position;
pub mod snapshot;
