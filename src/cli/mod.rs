use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::{
    error::CliError,
    output,
    pipeline::{self, Config, Outcome},
};

#[derive(Parser, Debug)]
#[command(name = "csvq")]
#[command(about = "Filter a CSV file and print the table or one aggregate")]
#[command(version)]
struct CliArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Filter condition, e.g. `price>100` or `brand=xiaomi`
    #[arg(short = 'w', long = "where", value_name = "CONDITION")]
    condition: Option<String>,

    /// Aggregation, e.g. `price=avg` (avg, min, max)
    #[arg(short = 'a', long = "aggregate", value_name = "AGGREGATE")]
    aggregate: Option<String>,
}

impl From<CliArgs> for Config {
    fn from(args: CliArgs) -> Self {
        Self {
            file: args.file,
            condition: args.condition,
            aggregate: args.aggregate,
        }
    }
}

pub fn run() -> Result<(), CliError> {
    let Some(args) = parse_cli_args()? else {
        return Ok(());
    };

    let outcome = pipeline::run(&Config::from(args))?;
    println!("{}", render_outcome(&outcome));
    Ok(())
}

fn parse_cli_args() -> Result<Option<CliArgs>, CliError> {
    match CliArgs::try_parse() {
        Ok(args) => Ok(Some(args)),
        Err(error) => {
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                print!("{error}");
                return Ok(None);
            }
            Err(CliError::InvalidArgs(error.to_string()))
        }
    }
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Table(table) => output::render_table(table),
        Outcome::Aggregate(result) => result.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::{
        engine::{AggregateFunction, AggregateResult},
        pipeline::{Config, Outcome},
    };

    use super::{CliArgs, render_outcome};

    #[test]
    fn parses_flags_with_clap() {
        let args = CliArgs::parse_from([
            "csvq",
            "phones.csv",
            "--where",
            "price>=500",
            "--aggregate",
            "price=avg",
        ]);

        assert_eq!(args.file, PathBuf::from("phones.csv"));
        assert_eq!(args.condition.as_deref(), Some("price>=500"));
        assert_eq!(args.aggregate.as_deref(), Some("price=avg"));
    }

    #[test]
    fn options_are_optional() {
        let config = Config::from(CliArgs::parse_from(["csvq", "phones.csv"]));
        assert_eq!(
            config,
            Config {
                file: PathBuf::from("phones.csv"),
                condition: None,
                aggregate: None,
            }
        );
    }

    #[test]
    fn accepts_short_flags_and_equals_form() {
        let args = CliArgs::parse_from([
            "csvq",
            "-w",
            "brand=xiaomi",
            "--aggregate=price=max",
            "phones.csv",
        ]);
        assert_eq!(args.condition.as_deref(), Some("brand=xiaomi"));
        assert_eq!(args.aggregate.as_deref(), Some("price=max"));
    }

    #[test]
    fn file_is_required() {
        assert!(CliArgs::try_parse_from(["csvq"]).is_err());
    }

    #[test]
    fn renders_aggregate_outcome_as_single_line() {
        let outcome = Outcome::Aggregate(AggregateResult {
            function: AggregateFunction::Max,
            column: "price".to_string(),
            value: Some(299.0),
        });
        assert_eq!(render_outcome(&outcome), "max(price) = 299.0");
    }
}
