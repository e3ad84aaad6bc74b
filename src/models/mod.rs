pub mod ec_level;
pub mod geometry;
pub mod matrix;
pub mod record;

pub use ec_level::ECLevel;
pub use geometry::Rect;
pub use matrix::ModuleMatrix;
pub use record::Record;
