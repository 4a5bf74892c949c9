pub mod browser;
pub mod clipboard;
pub mod process;
