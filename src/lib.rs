pub mod cli;
pub mod compositor;
pub mod config;
pub mod daemon;
pub mod error;
pub mod service;
pub mod window;

#[cfg(test)]
pub mod test_utils;
