pub mod catalog;
pub mod config;
pub mod errors;
pub mod export;
pub mod records;
pub mod site;
pub mod sink;
pub mod tut_utils;
