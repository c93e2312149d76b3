pub mod segment_pool;
pub mod swap;
