pub mod gen;
pub mod plan;
