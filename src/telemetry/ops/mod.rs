pub mod catalog;
pub mod plan;
pub mod browse;
pub mod items;
