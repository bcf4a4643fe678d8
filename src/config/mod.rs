pub mod settings;
pub mod table;

pub use settings::*;
pub use table::*;
