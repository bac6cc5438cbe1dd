//! Built-in demo inputs.

use std::fmt;

use element_combiner::reducer::ReducerBuilder;

/// A tagged value, as used by every scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: &'static str,
    pub value: i64,
    /// Tag the merged value takes instead of the operands' tag.
    pub retag: Option<&'static str>,
    pub ignore: bool,
}

impl Token {
    pub const fn new(tag: &'static str, value: i64) -> Self {
        Self {
            tag,
            value,
            retag: None,
            ignore: false,
        }
    }

    #[must_use]
    pub const fn retagged(mut self, retag: &'static str) -> Self {
        self.retag = Some(retag);
        self
    }

    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.tag, self.value)?;
        if let Some(retag) = self.retag {
            write!(formatter, "->{retag}")?;
        }
        if self.ignore {
            formatter.write_str(" (ignored)")?;
        }
        Ok(())
    }
}

/// A named input with the output it reduces to.
pub struct Scenario {
    pub name: &'static str,
    pub summary: &'static str,
    pub input: Vec<Token>,
    pub expected: Vec<Token>,
}

/// Every scenario the demo knows.
pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "combine",
            summary: "two equal tags merge",
            input: vec![Token::new("yes", 1), Token::new("yes", 1)],
            expected: vec![Token::new("yes", 2)],
        },
        Scenario {
            name: "distinct",
            summary: "different tags pass through",
            input: vec![Token::new("+", 1), Token::new("-", 1)],
            expected: vec![Token::new("+", 1), Token::new("-", 1)],
        },
        Scenario {
            name: "cancel",
            summary: "a zero sum removes both operands",
            input: vec![Token::new("v", 1), Token::new("v", -1)],
            expected: Vec::new(),
        },
        Scenario {
            name: "chain",
            summary: "cancelling the inner pair re-opens the outer pair",
            input: vec![
                Token::new("a", 10),
                Token::new("b", 1),
                Token::new("b", -1),
                Token::new("a", 10),
            ],
            expected: vec![Token::new("a", 20)],
        },
        Scenario {
            name: "retag",
            summary: "a retagged merge joins its committed neighbour",
            input: vec![
                Token::new("one", 10),
                Token::new("two", 1),
                Token::new("two", 1).retagged("one"),
            ],
            expected: vec![Token::new("one", 12)],
        },
        Scenario {
            name: "ignore",
            summary: "merging through an ignored element keeps it in place",
            input: vec![
                Token::new("x", 1),
                Token::new("i", -1).ignored(),
                Token::new("x", 10),
            ],
            expected: vec![Token::new("x", 11), Token::new("i", -1).ignored()],
        },
    ]
}

/// Looks a scenario up by name.
pub fn find(name: &str) -> Option<Scenario> {
    catalog()
        .into_iter()
        .find(|scenario| scenario.name == name)
}

/// The rules every scenario runs with.
pub fn builder<'a>() -> ReducerBuilder<'a, Token> {
    ReducerBuilder::<Token>::new()
        .compare(|anchor, candidate| anchor.tag == candidate.tag)
        .combine(|anchor, candidate| {
            let tag = candidate
                .retag
                .or(anchor.retag)
                .unwrap_or(candidate.tag);
            Token::new(tag, anchor.value + candidate.value)
        })
        .cancel(|value| value.value == 0)
        .ignore(|anchor, candidate| anchor.ignore || candidate.ignore)
}
