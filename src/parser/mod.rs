use std::fmt;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    combinator::{map, rest},
    sequence::separated_pair,
};

use crate::error::QueryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub op: Operator,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateSpec {
    pub column: String,
    /// Lower-cased, not yet validated against the known functions.
    pub function: String,
}

type Split<'a> = (&'a str, Operator, &'a str);

/// Splits `input` around the first occurrence of `symbol`.
fn split_on<'a>(
    symbol: &'static str,
    op: Operator,
) -> impl FnMut(&'a str) -> IResult<&'a str, Split<'a>> {
    map(
        separated_pair(take_until(symbol), tag(symbol), rest),
        move |(left, right)| (left, op, right),
    )
}

// Two-character operators come before their one-character prefixes, and `=`
// comes last, so `price>=100` never splits as `>` with value `=100`.
fn condition(input: &str) -> IResult<&str, Split<'_>> {
    alt((
        split_on(">=", Operator::Ge),
        split_on("<=", Operator::Le),
        split_on(">", Operator::Gt),
        split_on("<", Operator::Lt),
        split_on("=", Operator::Eq),
    ))(input)
}

pub fn parse_condition(input: &str) -> Result<Condition, QueryError> {
    let (_, (column, op, value)) =
        condition(input).map_err(|_| QueryError::InvalidCondition(input.to_string()))?;

    Ok(Condition {
        column: column.trim().to_string(),
        op,
        value: value.trim().to_string(),
    })
}

fn aggregate(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until("="), tag("="), rest)(input)
}

pub fn parse_aggregate(input: &str) -> Result<AggregateSpec, QueryError> {
    let (_, (column, function)) =
        aggregate(input).map_err(|_| QueryError::InvalidAggregate(input.to_string()))?;

    Ok(AggregateSpec {
        column: column.trim().to_string(),
        function: function.trim().to_lowercase(),
    })
}
