//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the store and reports. Every handler writes to
//! a caller-supplied `Write` so the binary and the tests share them.

pub mod config;
pub mod report;
pub mod session;

use chrono::NaiveDate;

use crate::models::Category;

pub use config::handle_config_command;
pub use report::{handle_list_command, handle_summary_command, ListArgs, SummaryArgs};
pub use session::{run_session, SessionCommand};

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse a `Category=amount` budget argument
pub fn parse_budget(s: &str) -> Result<(Category, i64), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid budget '{}', expected Category=amount", s))?;

    let category = Category::parse(category).map_err(|e| e.to_string())?;
    let amount = amount
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid budget amount '{}'", amount.trim()))?;

    Ok((category, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-10"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
        assert!(parse_date("10/06/2024").is_err());
    }

    #[test]
    fn test_parse_budget() {
        assert_eq!(parse_budget("Food=250"), Ok((Category::Food, 250)));
        assert_eq!(parse_budget("transporte = 80"), Ok((Category::Transport, 80)));
        assert!(parse_budget("Food").is_err());
        assert!(parse_budget("Gadgets=10").is_err());
        assert!(parse_budget("Food=lots").is_err());
    }
}
