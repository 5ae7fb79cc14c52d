use std::{fmt, str::FromStr};

use crate::{
    error::QueryError,
    parser::{AggregateSpec, Condition, Operator},
    row::{Row, parse_number},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFunction {
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl FromStr for AggregateFunction {
    type Err = QueryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(QueryError::UnknownAggregateFunction(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AggregateResult {
    pub function: AggregateFunction,
    pub column: String,
    /// `None` when no rows were aggregated.
    pub value: Option<f64>,
}

/// Keeps the rows matching `condition`, in their original order.
///
/// Without a condition every row is kept. A row missing the condition's
/// column aborts the whole filter.
pub fn filter_rows(
    rows: &[Row],
    condition: Option<&Condition>,
) -> Result<Vec<Row>, QueryError> {
    let Some(condition) = condition else {
        return Ok(rows.to_vec());
    };

    let mut kept = Vec::new();
    for row in rows {
        if matches(row, condition)? {
            kept.push(row.clone());
        }
    }
    Ok(kept)
}

/// Numeric comparison when both the cell and the literal parse as floats,
/// string comparison otherwise.
pub fn matches(
    row: &Row,
    condition: &Condition,
) -> Result<bool, QueryError> {
    let cell = row
        .get(&condition.column)
        .ok_or_else(|| QueryError::MissingColumn {
            column: condition.column.clone(),
        })?;

    let matched = match (cell.as_number(), parse_number(&condition.value)) {
        (Some(left), Some(right)) => compare(condition.op, &left, &right),
        _ => compare(condition.op, cell.as_str(), condition.value.as_str()),
    };
    Ok(matched)
}

fn compare<T: PartialOrd + ?Sized>(
    op: Operator,
    left: &T,
    right: &T,
) -> bool {
    match op {
        Operator::Eq => left == right,
        Operator::Gt => left > right,
        Operator::Lt => left < right,
        Operator::Ge => left >= right,
        Operator::Le => left <= right,
    }
}

pub fn aggregate(
    rows: &[Row],
    spec: &AggregateSpec,
) -> Result<AggregateResult, QueryError> {
    let values = column_values(rows, &spec.column)?;
    let function: AggregateFunction = spec.function.parse()?;

    let value = match function {
        AggregateFunction::Avg => mean(&values),
        AggregateFunction::Min => pick(&values, |candidate, current| candidate < current),
        AggregateFunction::Max => pick(&values, |candidate, current| candidate > current),
    };

    Ok(AggregateResult {
        function,
        column: spec.column.clone(),
        value,
    })
}

fn column_values(
    rows: &[Row],
    column: &str,
) -> Result<Vec<f64>, QueryError> {
    rows.iter()
        .map(|row| {
            let cell = row.get(column).ok_or_else(|| QueryError::MissingColumn {
                column: column.to_string(),
            })?;
            cell.as_number()
                .ok_or_else(|| QueryError::NumericConversion {
                    column: column.to_string(),
                    value: cell.as_str().to_string(),
                })
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// Replaces the running pick only on a strict win, so ties keep the first value.
fn pick(
    values: &[f64],
    wins: impl Fn(f64, f64) -> bool,
) -> Option<f64> {
    values
        .iter()
        .copied()
        .reduce(|current, candidate| {
            if wins(candidate, current) {
                candidate
            } else {
                current
            }
        })
}
