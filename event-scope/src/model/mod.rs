pub mod agg;
pub mod cli;
pub mod role;
pub mod taxonomy;
