use statrs::statistics::Statistics;

use crate::error::ExplorerError;
use crate::models::{Cell, KeyValue};

/// Numeric cells of a row, skipping the key column and any text cells.
pub fn numeric_values(row: &[Cell], key_column: usize) -> Vec<f64> {
    row.iter()
        .enumerate()
        .filter(|(column, _)| *column != key_column)
        .filter_map(|(_, cell)| cell.as_number())
        .collect()
}

/// Arithmetic mean. An empty slice is `DivisionByZero`.
pub fn mean(values: &[f64]) -> Result<f64, ExplorerError> {
    if values.is_empty() {
        return Err(ExplorerError::DivisionByZero(
            "mean of an empty set of values".to_string(),
        ));
    }
    Ok(values.iter().mean())
}

/// Mean of a row's numeric cells, excluding the key column.
pub fn row_mean(row: &[Cell], key_column: usize) -> Result<f64, ExplorerError> {
    let values = numeric_values(row, key_column);
    if values.is_empty() {
        return Err(ExplorerError::DivisionByZero(format!(
            "row '{}' has no numeric cells",
            row.get(key_column).map(|c| c.to_string()).unwrap_or_default()
        )));
    }
    mean(&values)
}

/// Sum of a row's numeric cells, excluding the key column.
pub fn row_sum(row: &[Cell], key_column: usize) -> f64 {
    numeric_values(row, key_column).iter().sum()
}

/// Mean of per-row means for a region. A region with no rows is `DivisionByZero`.
pub fn region_mean(row_means: &[f64]) -> Result<f64, ExplorerError> {
    if row_means.is_empty() {
        return Err(ExplorerError::DivisionByZero(
            "region contains no rows".to_string(),
        ));
    }
    mean(row_means)
}

/// Entry with the smallest value; the earliest entry wins a tie.
pub fn min_by_value(pairs: &[KeyValue]) -> Result<&KeyValue, ExplorerError> {
    select_by(pairs, |candidate, best| candidate < best)
}

/// Entry with the largest value; the earliest entry wins a tie.
pub fn max_by_value(pairs: &[KeyValue]) -> Result<&KeyValue, ExplorerError> {
    select_by(pairs, |candidate, best| candidate > best)
}

fn select_by(
    pairs: &[KeyValue],
    better: impl Fn(f64, f64) -> bool,
) -> Result<&KeyValue, ExplorerError> {
    let mut iter = pairs.iter();
    let first = iter
        .next()
        .ok_or_else(|| ExplorerError::NotFound("no values to rank".to_string()))?;
    // Strict comparison keeps the first occurrence among equal values
    Ok(iter.fold(first, |best, candidate| {
        if better(candidate.value, best.value) {
            candidate
        } else {
            best
        }
    }))
}

/// Population per unit of land area.
///
/// Both inputs must be finite; a zero area is `DivisionByZero`.
pub fn density(population: f64, area: f64) -> Result<f64, ExplorerError> {
    if !population.is_finite() || !area.is_finite() {
        return Err(ExplorerError::InvalidInput(format!(
            "population {population} and land area {area} must be finite"
        )));
    }
    if area == 0.0 {
        return Err(ExplorerError::DivisionByZero("land area is 0".to_string()));
    }
    Ok(population / area)
}

/// Change from the earliest to the latest observation (`latest - earliest`).
///
/// Positive means the population grew.
pub fn population_delta(latest: f64, earliest: f64) -> f64 {
    latest - earliest
}

/// Round to two decimal places, as exported values are.
///
/// Rounds the exact binary value half to even, so `0.125` becomes `0.12`
/// and `2.675` (stored just below) becomes `2.67`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn row(key: &str, values: &[f64]) -> Vec<Cell> {
        std::iter::once(Cell::from(key))
            .chain(values.iter().map(|v| Cell::Number(*v)))
            .collect()
    }

    #[test]
    fn test_row_mean_excludes_key() {
        let r = row("Kenya", &[10.0, 20.0, 30.0, 40.0]);
        assert_approx_eq!(row_mean(&r, 0).unwrap(), 25.0);
    }

    #[test]
    fn test_row_mean_ignores_text_cells() {
        let r = vec![
            Cell::from("Chad"),
            Cell::Number(4.0),
            Cell::from("n/a"),
            Cell::Number(8.0),
        ];
        assert_approx_eq!(row_mean(&r, 0).unwrap(), 6.0);
    }

    #[test]
    fn test_row_mean_no_numbers() {
        let r = vec![Cell::from("Chad"), Cell::from("n/a")];
        assert!(matches!(
            row_mean(&r, 0),
            Err(ExplorerError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_row_sum() {
        let r = row("Peru", &[1.0, 2.5, 3.5]);
        assert_approx_eq!(row_sum(&r, 0), 7.0);
        assert_eq!(row_sum(&row("Empty", &[]), 0), 0.0);
    }

    #[test]
    fn test_region_mean_of_row_means() {
        let rows = [
            row("A", &[10.0, 20.0, 30.0, 40.0]),
            row("B", &[0.0, 0.0, 0.0, 0.0]),
            row("C", &[5.0, 5.0, 5.0, 5.0]),
        ];
        let means: Vec<f64> = rows.iter().map(|r| row_mean(r, 0).unwrap()).collect();
        assert_approx_eq!(region_mean(&means).unwrap(), 10.0);
    }

    #[test]
    fn test_region_mean_empty_is_division_by_zero() {
        assert!(matches!(
            region_mean(&[]),
            Err(ExplorerError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_min_max_tie_break_first_occurrence() {
        let pairs: Vec<KeyValue> = vec![("A", 5.0).into(), ("B", 1.0).into(), ("C", 1.0).into()];
        let max = max_by_value(&pairs).unwrap();
        assert_eq!(max.key, "A");
        assert_eq!(max.value, 5.0);
        let min = min_by_value(&pairs).unwrap();
        assert_eq!(min.key, "B");
        assert_eq!(min.value, 1.0);
    }

    #[test]
    fn test_max_tie_break_first_occurrence() {
        let pairs: Vec<KeyValue> = vec![("X", 3.0).into(), ("Y", 9.0).into(), ("Z", 9.0).into()];
        assert_eq!(max_by_value(&pairs).unwrap().key, "Y");
    }

    #[test]
    fn test_min_max_empty() {
        assert!(min_by_value(&[]).is_err());
        assert!(max_by_value(&[]).is_err());
    }

    #[test]
    fn test_density() {
        assert_approx_eq!(density(1000.0, 4.0).unwrap(), 250.0);
    }

    #[test]
    fn test_density_zero_area_is_error_not_inf() {
        let err = density(1000.0, 0.0).unwrap_err();
        assert!(matches!(err, ExplorerError::DivisionByZero(_)));
    }

    #[test]
    fn test_density_rejects_non_finite_inputs() {
        for (population, area) in [(1000.0, f64::NAN), (1000.0, f64::INFINITY), (f64::NAN, 5.0)] {
            let err = density(population, area).unwrap_err();
            assert!(matches!(err, ExplorerError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_population_delta_direction() {
        assert_eq!(population_delta(120.0, 100.0), 20.0);
        assert_eq!(population_delta(90.0, 100.0), -10.0);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_err());
        assert_approx_eq!(mean(&[1.0, 2.0]).unwrap(), 1.5);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(93.6349), 93.63);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_round2_half_to_even_on_binary_value() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(8.0), 8.0);
    }
}
