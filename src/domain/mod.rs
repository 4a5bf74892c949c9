pub mod error;
pub mod operation;
pub mod services;
pub mod url_builder;
