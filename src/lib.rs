pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;
pub mod scheduler;
pub mod util;

pub use config::Config;
pub use runtime::Runtime;
