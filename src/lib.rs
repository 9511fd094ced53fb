//! **mazegen** is a maze generation, route finding and text rendering library.

pub mod bitgrid;
pub mod cells;
pub mod dimensions;
pub mod displays;
pub mod generators;
pub mod layout;
pub mod pathing;
pub mod units;
