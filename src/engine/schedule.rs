//! Cash flow schedules and evaluation results

use serde::{Deserialize, Serialize};

/// One period of a collection option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month index, 0 = immediate
    pub period: u32,

    /// Projected local/foreign exchange rate (FX-indexed installments only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_exchange_rate: Option<f64>,

    /// Amount collected in that month, local currency
    pub nominal_cash_flow: f64,

    /// Nominal cash flow discounted to month 0
    pub present_value: f64,
}

/// Rows ordered by period ascending, contiguous from the first period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    rows: Vec<ScheduleRow>,
}

impl CashFlowSchedule {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, row: ScheduleRow) {
        debug_assert!(
            self.rows.last().map_or(true, |last| last.period + 1 == row.period),
            "schedule periods must be contiguous"
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_period(&self) -> Option<u32> {
        self.rows.first().map(|row| row.period)
    }

    pub fn last_period(&self) -> Option<u32> {
        self.rows.last().map(|row| row.period)
    }

    /// Row for a given month, if the schedule covers it
    #[cfg(test)]
    pub(crate) fn row(&self, period: u32) -> Option<&ScheduleRow> {
        let first = self.first_period()?;
        let idx = period.checked_sub(first)? as usize;
        self.rows.get(idx)
    }

    /// Sum of nominal cash flows ("total to collect")
    pub fn total_nominal(&self) -> f64 {
        self.rows.iter().map(|row| row.nominal_cash_flow).sum()
    }

    /// Sum of present values
    pub fn total_present_value(&self) -> f64 {
        self.rows.iter().map(|row| row.present_value).sum()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// NPV of one option together with the schedule it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub net_present_value: f64,
    pub schedule: CashFlowSchedule,
}

impl EvaluationResult {
    /// NPV is always the sum of the schedule's present values
    pub fn from_schedule(schedule: CashFlowSchedule) -> Self {
        Self {
            net_present_value: schedule.total_present_value(),
            schedule,
        }
    }

    pub fn total_nominal(&self) -> f64 {
        self.schedule.total_nominal()
    }
}
