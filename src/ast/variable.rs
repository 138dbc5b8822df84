use pest::iterators::Pair;

use super::Rule;

/// A name occurrence in expression or assignment-target position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Variable {
        Variable { name: name.into() }
    }

    pub fn from_pair(pair: Pair<Rule>) -> Variable {
        Variable {
            name: pair.as_str().to_owned(),
        }
    }
}
