pub mod create;
pub mod estimate;
pub mod send;
