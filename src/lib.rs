pub mod bot;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod relay;
pub mod types;

pub use bot::run;
