pub mod app;
pub mod logging;
pub mod renderer;
pub mod settings;
