pub mod scale;
pub mod table;

pub use scale::{LinearScale, TimeScale};
pub use table::Table;
