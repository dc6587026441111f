// Library root: the data layer shared by the page controllers and the TUI.
//
// `client` talks to the Sleeper API, `join` resolves ids across payloads, and
// `view` shapes the joined records into what each page renders.

pub mod client;
pub mod config;
pub mod join;
pub mod model;
pub mod position;
pub mod view;
