pub mod category;
pub mod clock;
pub mod color;
pub mod repeat;
pub mod task;
