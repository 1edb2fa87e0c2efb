// simulation_engine/mod.rs
pub mod grid;
pub mod movement;
pub mod render;
pub mod simulation;

pub use grid::Canvas;
pub use render::{BitmapRenderer, Frame, FrameRenderer, TrajectoryLog};
pub use simulation::{Simulation, SimulationReport, StopReason};
