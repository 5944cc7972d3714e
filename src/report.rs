//! Rendering of a comparison: text tables, CSV schedules and a JSON report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::{CashFlowSchedule, OptionId, ScheduleRow};
use crate::scenario::{Comparison, ScenarioInputs};

/// Local currency prefix used in rendered amounts
pub const CURRENCY: &str = "AR$";

/// `1234567.891` -> `1,234,567.89`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.2}", value.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Values that round to zero are printed without a sign
    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// `1234.5` -> `AR$ 1,234.50`
pub fn format_currency(value: f64) -> String {
    format!("{} {}", CURRENCY, format_number(value))
}

/// Human readable report of a comparison
pub struct TextReport<'a>(pub &'a Comparison);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.0;

        writeln!(f, "Summary and recommendation")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Recommended option: {}", comparison.recommended)?;
        writeln!(f, "It yields the highest Net Present Value (NPV) under the given assumptions.")?;
        writeln!(f)?;
        for (id, result) in comparison.iter() {
            writeln!(f, "  {:<36} {:>22}", id.title(), format_currency(result.net_present_value))?;
        }
        writeln!(
            f,
            "\nMonthly discount rate: {:.4}% ({:.2}% annual)",
            comparison.monthly_discount_rate * 100.0,
            comparison.inputs.annual_discount_rate_pct
        )?;

        for (id, result) in comparison.iter() {
            writeln!(f)?;
            writeln!(f, "{}", detail_heading(id, &comparison.inputs))?;
            writeln!(f, "{}", "-".repeat(72))?;
            match id {
                OptionId::LumpSum => writeln!(
                    f,
                    "A single payment of {} is received up front.",
                    format_currency(result.net_present_value)
                )?,
                _ => writeln!(
                    f,
                    "Total nominal to collect over {} months: {}. Total present value: {}.",
                    result.schedule.last_period().unwrap_or(0),
                    format_currency(result.total_nominal()),
                    format_currency(result.net_present_value)
                )?,
            }
            write_schedule_table(f, &result.schedule, id == OptionId::FxIndexed)?;
        }

        Ok(())
    }
}

fn detail_heading(id: OptionId, inputs: &ScenarioInputs) -> String {
    match id {
        OptionId::LumpSum => "Option 1: Cash payment with discount".to_string(),
        OptionId::InflationIndexed => {
            format!("Option 2: {} installments indexed by inflation", inputs.periods)
        }
        OptionId::FxIndexed => format!(
            "Option 3: {} installments indexed by exchange rate (dollar based)",
            inputs.periods
        ),
    }
}

fn write_schedule_table(
    f: &mut fmt::Formatter<'_>,
    schedule: &CashFlowSchedule,
    with_fx: bool,
) -> fmt::Result {
    if with_fx {
        writeln!(
            f,
            "{:>5} {:>14} {:>22} {:>22}",
            "Month", "Projected FX", "Cash flow", "Present value"
        )?;
    } else {
        writeln!(f, "{:>5} {:>22} {:>22}", "Month", "Cash flow", "Present value")?;
    }

    for row in schedule {
        if with_fx {
            let fx = row.projected_exchange_rate.map(format_number).unwrap_or_default();
            writeln!(
                f,
                "{:>5} {:>14} {:>22} {:>22}",
                row.period,
                fx,
                format_currency(row.nominal_cash_flow),
                format_currency(row.present_value)
            )?;
        } else {
            writeln!(
                f,
                "{:>5} {:>22} {:>22}",
                row.period,
                format_currency(row.nominal_cash_flow),
                format_currency(row.present_value)
            )?;
        }
    }
    Ok(())
}

/// CSV record; the FX column is left empty for options without one
#[derive(Debug, Serialize)]
struct CsvRow {
    period: u32,
    projected_exchange_rate: Option<f64>,
    nominal_cash_flow: f64,
    present_value: f64,
}

impl From<&ScheduleRow> for CsvRow {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            period: row.period,
            projected_exchange_rate: row.projected_exchange_rate,
            nominal_cash_flow: row.nominal_cash_flow,
            present_value: row.present_value,
        }
    }
}

/// Write one schedule as CSV
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &CashFlowSchedule) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in schedule {
        csv_writer.serialize(CsvRow::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `<key>.csv` for every option into `dir`, returning the paths written
pub fn write_csv_dir(dir: &Path, comparison: &Comparison) -> anyhow::Result<Vec<PathBuf>> {
    use anyhow::Context;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(OptionId::ALL.len());
    for (id, result) in comparison.iter() {
        let path = dir.join(format!("{}.csv", id.key()));
        let file = File::create(&path)
            .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
        write_schedule_csv(file, &result.schedule)
            .with_context(|| format!("Unable to write CSV file {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Per-option section of the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct OptionReport<'a> {
    pub id: OptionId,
    pub title: &'static str,
    pub net_present_value: f64,
    pub total_nominal: f64,
    pub schedule: &'a CashFlowSchedule,
}

/// JSON document describing a comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub inputs: &'a ScenarioInputs,
    pub monthly_discount_rate: f64,
    pub recommended: OptionId,
    pub options: Vec<OptionReport<'a>>,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(comparison: &'a Comparison) -> Self {
        Self::at(comparison, Utc::now())
    }

    pub fn at(comparison: &'a Comparison, generated_at: DateTime<Utc>) -> Self {
        let options = comparison
            .iter()
            .map(|(id, result)| OptionReport {
                id,
                title: id.title(),
                net_present_value: result.net_present_value,
                total_nominal: result.total_nominal(),
                schedule: &result.schedule,
            })
            .collect();

        Self {
            generated_at,
            inputs: &comparison.inputs,
            monthly_discount_rate: comparison.monthly_discount_rate,
            recommended: comparison.recommended,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::evaluate;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(999.999), "1,000.00");
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
        assert_eq!(format_number(930_000.0), "930,000.00");
        assert_eq!(format_number(-100_000.0), "-100,000.00");
        assert_eq!(format_number(-0.001), "0.00");
        assert_eq!(format_number(12.5), "12.50");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(929_999.999_999_999_9), "AR$ 930,000.00");
    }

    #[test]
    fn test_text_report_sections() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();
        let text = TextReport(&comparison).to_string();

        assert!(text.contains("Recommended option: Option 2: Installments + inflation"));
        assert!(text.contains("AR$ 930,000.00"));
        assert!(text.contains("Option 3: 12 installments indexed by exchange rate"));
        assert!(text.contains("Projected FX"));
        assert!(text.contains("1,706.06"));
        assert!(text.contains("Total nominal to collect over 12 months"));
    }

    #[test]
    fn test_schedule_csv() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();

        let mut buf = Vec::new();
        write_schedule_csv(&mut buf, &comparison.lump_sum.schedule).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("period,projected_exchange_rate,nominal_cash_flow,present_value")
        );
        assert!(lines.next().unwrap().starts_with("0,,"));
        assert!(lines.next().is_none());

        let mut buf = Vec::new();
        write_schedule_csv(&mut buf, &comparison.fx_indexed.schedule).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().nth(1).unwrap().starts_with("1,997.5,"));
    }

    #[test]
    fn test_csv_dir() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();
        let dir = std::env::temp_dir()
            .join(format!("credit_collection_csv_{}", std::process::id()));

        let written = write_csv_dir(&dir, &comparison).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written[0].ends_with("lump_sum.csv"));
        assert!(written.iter().all(|p| p.exists()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_report() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();
        let stamp = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let json = serde_json::to_value(ComparisonReport::at(&comparison, stamp)).unwrap();

        assert_eq!(json["generated_at"], "2026-01-15T12:00:00Z");
        assert_eq!(json["recommended"], "inflation_indexed");
        assert_eq!(json["inputs"]["principal"], 1_000_000.0);

        let options = json["options"].as_array().unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0]["id"], "lump_sum");
        assert_eq!(options[0]["schedule"].as_array().unwrap().len(), 1);
        assert_eq!(options[2]["schedule"][11]["period"], 12);
        assert!(options[2]["schedule"][0]["projected_exchange_rate"].is_number());
        assert!(options[1]["schedule"][0].get("projected_exchange_rate").is_none());
    }
}
