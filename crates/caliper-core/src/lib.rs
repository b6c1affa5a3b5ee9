pub mod config;
pub mod consts;
pub mod error;
pub mod image;
pub mod io;
pub mod measurement;
pub mod report;
pub mod session;
pub mod store;
pub mod view;
