// Library surface for headless/integration tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod input;
pub mod interval;
pub mod logging;
pub mod opacity;
pub mod runtime;
pub mod tracker;
pub mod ui;
pub mod util;
