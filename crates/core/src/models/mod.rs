pub mod cash;
pub mod dashboard;
pub mod position;
pub mod stock;
