pub mod editor;
pub mod point;
pub mod style;
