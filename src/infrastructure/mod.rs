pub mod browser;
pub mod clipboard;
pub mod di;
pub mod process;
