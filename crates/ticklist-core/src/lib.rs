pub mod screen;
pub mod task;

pub use screen::{Screen, Submit};
pub use task::{Task, TaskId};
