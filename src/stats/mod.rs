// Baseball stat math: rate formulas, per-player aggregation and league ranks.

pub mod aggregate;
pub mod dates;
pub mod ranking;
pub mod rates;

pub use aggregate::{aggregate, CountingTotals, GameLine, PlayerAggregate};
pub use ranking::{rank, Direction};
pub use rates::{CountingInputs, RateStats};
