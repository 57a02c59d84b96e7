#[cfg(test)]
mod tests;

pub mod config;
pub mod dataset;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod state;
pub mod ui;
