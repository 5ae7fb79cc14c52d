pub mod cli;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod row;
pub mod source;

pub fn run() -> Result<(), error::CliError> {
    cli::run()
}
