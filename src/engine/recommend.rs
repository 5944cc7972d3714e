//! Selection of the option with the highest NPV

use super::schedule::EvaluationResult;
use crate::error::{EngineError, EngineResult};

/// Return the key whose result has the largest NPV.
///
/// Results are scanned in iteration order and only a strictly larger NPV
/// replaces the current best, so exact ties go to the first key seen.
pub fn recommend<'a, K, I>(results: I) -> EngineResult<K>
where
    I: IntoIterator<Item = (K, &'a EvaluationResult)>,
{
    let mut best: Option<(K, f64)> = None;

    for (key, result) in results {
        let npv = result.net_present_value;
        if !npv.is_finite() {
            return Err(EngineError::invalid_input(
                "results",
                format!("net present value must be finite, got {}", npv),
            ));
        }

        let is_better = match best {
            Some((_, best_npv)) => npv > best_npv,
            None => true,
        };
        if is_better {
            best = Some((key, npv));
        }
    }

    best.map(|(key, _)| key)
        .ok_or_else(|| EngineError::invalid_input("results", "no options to compare"))
}
