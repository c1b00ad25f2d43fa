pub mod analyzers;
pub mod collect;
pub mod config;
pub mod output;
pub mod parser;
pub mod records;
pub mod shell;
pub mod stats;
