pub mod classify;
pub mod config;
pub mod daily;
pub mod hierarchy;
pub mod migrate;
pub mod opportunity;
pub mod paths;
pub mod writer;
