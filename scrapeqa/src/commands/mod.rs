// scrapeqa/src/commands/mod.rs

pub mod crosscheck;
pub mod quality;
pub mod validate;
