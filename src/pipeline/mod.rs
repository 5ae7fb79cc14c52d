use std::path::PathBuf;

use tracing::debug;

use crate::{
    engine::{self, AggregateResult},
    error::{CliError, QueryError},
    parser,
    row::Row,
    source::{self, Table},
};

/// Everything one run needs; empty `condition`/`aggregate` strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub file: PathBuf,
    pub condition: Option<String>,
    pub aggregate: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Table(Table),
    Aggregate(AggregateResult),
}

pub fn run(config: &Config) -> Result<Outcome, CliError> {
    let table = source::read_table(&config.file).map_err(CliError::Read)?;
    debug!(
        file = %config.file.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read csv"
    );

    match non_empty(config.aggregate.as_deref()) {
        Some(aggregate) => {
            aggregate_rows(&table, non_empty(config.condition.as_deref()), aggregate)
                .map(Outcome::Aggregate)
                .map_err(CliError::Aggregate)
        }
        None => {
            let rows = filter_table(&table, non_empty(config.condition.as_deref()))
                .map_err(CliError::Filter)?;
            Ok(Outcome::Table(Table {
                headers: table.headers,
                rows,
            }))
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn filter_table(
    table: &Table,
    condition: Option<&str>,
) -> Result<Vec<Row>, QueryError> {
    let condition = condition.map(parser::parse_condition).transpose()?;
    if let Some(condition) = &condition {
        debug!(
            column = %condition.column,
            op = %condition.op,
            value = %condition.value,
            "parsed condition"
        );
    }

    let rows = engine::filter_rows(&table.rows, condition.as_ref())?;
    debug!(kept = rows.len(), total = table.rows.len(), "filtered rows");
    Ok(rows)
}

fn aggregate_rows(
    table: &Table,
    condition: Option<&str>,
    aggregate: &str,
) -> Result<AggregateResult, QueryError> {
    let rows = filter_table(table, condition)?;
    let spec = parser::parse_aggregate(aggregate)?;
    let result = engine::aggregate(&rows, &spec)?;
    debug!(
        function = %result.function,
        column = %result.column,
        value = ?result.value,
        "computed aggregate"
    );
    Ok(result)
}
