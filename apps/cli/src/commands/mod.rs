pub mod database;
pub mod design;
pub mod sequence;
