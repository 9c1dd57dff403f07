pub mod config;
pub mod load;
pub mod plot;
pub mod record;
