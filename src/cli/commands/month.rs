//! `month` command: preview the assign-month value for operator input.

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Args;
use serde::Serialize;

use crate::cli::display::check_mark;
use crate::cli::output::{output, CommandOutput};
use crate::cli::prompt::INVALID_MONTH_MESSAGE;
use crate::domain::models::{AssignMonth, JalaliDate};

#[derive(Args, Debug)]
pub struct MonthArgs {
    /// Month and year, e.g. `aban 1403`
    #[arg(required = true, num_args = 1..)]
    pub input: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MonthOutput {
    pub input: String,
    pub value: String,
    pub month: String,
    pub year: String,
    /// Persian name of the current Jalali month, as used for not-touch worksheets
    pub current_month: String,
}

impl CommandOutput for MonthOutput {
    fn to_human(&self) -> String {
        format!(
            "{} {} → {}\nCurrent Jalali month: {}",
            check_mark(),
            self.input,
            self.value,
            self.current_month
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn month_output(input: &str, today: chrono::NaiveDate) -> Result<MonthOutput> {
    let month = AssignMonth::parse(input).map_err(|_| anyhow!(INVALID_MONTH_MESSAGE))?;
    Ok(MonthOutput {
        input: input.to_string(),
        value: month.to_string(),
        month: month.month().latin_name().to_string(),
        year: month.year().to_string(),
        current_month: JalaliDate::from_gregorian(today)
            .persian_month()
            .persian_name()
            .to_string(),
    })
}

pub fn execute(args: &MonthArgs, json_mode: bool) -> Result<()> {
    let input = args.input.join(" ");
    let result = month_output(&input, Local::now().date_naive())?;
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_month_output() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
        let out = month_output("Aban 1403", today).unwrap();
        assert_eq!(out.value, "آبان 1403");
        assert_eq!(out.month, "aban");
        assert_eq!(out.year, "1403");
        assert_eq!(out.current_month, "آبان");
    }

    #[test]
    fn test_month_output_rejects_bad_input() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
        let err = month_output("aban", today).unwrap_err();
        assert_eq!(err.to_string(), INVALID_MONTH_MESSAGE);
    }
}
