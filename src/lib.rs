pub mod cli;
pub mod db;
pub mod import;
pub mod models;
pub mod session;

pub use db::Database;
