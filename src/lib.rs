pub mod types;
pub mod error;
pub mod calculator;
pub mod config;
pub mod format;
pub mod store;
pub mod ffi;

pub use types::*;
pub use error::{ConfigError, SplitError};
pub use calculator::{compute, compute_grand_total, compute_per_person};
pub use config::SplitConfig;
pub use format::{format_currency, round_money, CurrencyFormat, CurrencyFormatter};
pub use store::{SplitStore, SubscriptionId};
