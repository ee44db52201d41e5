pub mod bounded_buffer;
pub mod consume_tally;
pub mod delay_policy;
pub mod item;
pub mod run_config;
pub mod run_counters;
pub mod shared_buffer;
