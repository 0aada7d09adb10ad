pub mod presets;
pub mod util;

pub use util::split_csv;
