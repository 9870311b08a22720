mod config;
pub use config::*;

mod document;
mod layout;
mod rendering;
mod wrap;
