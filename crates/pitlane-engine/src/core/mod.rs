pub mod event;
pub mod page;
pub mod schedule;
