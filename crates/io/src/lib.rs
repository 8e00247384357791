// File I/O around the comparison engine

pub mod csv;
pub mod extract;
pub mod truth;
pub mod xlsx;
