use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid where condition '{0}': expected <column><op><value> with op one of >=, <=, >, <, =")]
    InvalidCondition(String),
    #[error("column '{column}' not found")]
    MissingColumn { column: String },
    #[error("Invalid aggregate format '{0}': expected <column>=<function>")]
    InvalidAggregate(String),
    #[error("Unknown aggregate function '{0}': supported functions are avg, min, max")]
    UnknownAggregateFunction(String),
    #[error("could not convert value '{value}' in column '{column}' to a number")]
    NumericConversion { column: String, value: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid args: {0}\n\nTip: run `csvq --help` to see usage and examples.")]
    InvalidArgs(String),
    #[error("Error reading file: {0}")]
    Read(#[source] SourceError),
    #[error("Error in filter: {0}\n\n{tip}", tip = query_tip(.0))]
    Filter(#[source] QueryError),
    #[error("Error in aggregation: {0}\n\n{tip}", tip = query_tip(.0))]
    Aggregate(#[source] QueryError),
}

fn query_tip(error: &QueryError) -> &'static str {
    match error {
        QueryError::InvalidCondition(_) => {
            "Tip: condition format is `<column><op><value>`.\nExample: `csvq phones.csv --where price>=500`"
        }
        QueryError::InvalidAggregate(_) | QueryError::UnknownAggregateFunction(_) => {
            "Tip: aggregate format is `<column>=avg|min|max`.\nExample: `csvq phones.csv --aggregate price=avg`"
        }
        QueryError::MissingColumn { .. } => {
            "Tip: column names are case-sensitive and must match the CSV header."
        }
        QueryError::NumericConversion { .. } => {
            "Tip: aggregates need every selected cell to be numeric; narrow the rows with --where."
        }
    }
}
