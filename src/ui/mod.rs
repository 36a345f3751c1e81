pub mod bars;
pub mod panels;
