pub mod settings;
pub mod watchlist;

pub use settings::*;
pub use watchlist::*;
