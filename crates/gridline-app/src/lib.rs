// Library root: page controllers and the event loop that drives them.

pub mod app;
pub mod page;
pub mod protocol;
