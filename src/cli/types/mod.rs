//! Validated request parameters shared by the CLI and the library.

pub mod columns;
pub mod season_type;
pub mod time;

pub use columns::Columns;
pub use season_type::{parse_season_types, SeasonType};
pub use time::{Season, SeasonParam, Week, Weeks};
