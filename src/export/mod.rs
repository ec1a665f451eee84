pub mod png;
pub mod points;
pub mod table_csv;

pub use png::{IMAGE_HEIGHT, IMAGE_WIDTH, save_png};
pub use points::{points_text, save_points};
pub use table_csv::save_table_file;
