pub mod config;
pub mod player;
pub mod scheduler;
pub mod slots;
pub mod startup;
pub mod status;
pub mod throughput;
