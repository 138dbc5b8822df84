use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

use super::{ParseError, ParseResult};

#[derive(Parser)]
#[grammar = "mini-c.pest"]
pub struct MiniCParser;

impl MiniCParser {
    pub fn parse_program(source: &str) -> ParseResult<Pairs<Rule>> {
        Self::parse(Rule::program, source).map_err(ParseError::from_pest)
    }
}
