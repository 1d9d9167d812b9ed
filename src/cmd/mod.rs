pub mod batch;
pub mod evaluate;
