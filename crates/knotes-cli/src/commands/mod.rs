pub mod common;
pub mod completions;
pub mod info;
pub mod new;
pub mod open;
pub mod show;
