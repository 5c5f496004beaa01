pub mod calendar;
pub mod categories;
pub mod clock;
pub mod flow;
pub mod settings;
pub mod statistics;
