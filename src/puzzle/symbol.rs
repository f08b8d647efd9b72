//! Edge symbols and the pair table that decides which edges may touch

use serde::{Deserialize, Serialize};
use std::fmt;

/// One half of a frog printed on a tile edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    GreenHead,
    GreenLegs,
    YellowHead,
    YellowLegs,
    StripeyHead,
    StripeyLegs,
    SpottyHead,
    SpottyLegs,
}

/// The four unordered pairs of symbols that form a whole frog.
/// Any combination not listed here, including a symbol with itself, is a mismatch.
pub const PAIRS: [(Symbol, Symbol); 4] = [
    (Symbol::GreenHead, Symbol::GreenLegs),
    (Symbol::YellowHead, Symbol::YellowLegs),
    (Symbol::StripeyHead, Symbol::StripeyLegs),
    (Symbol::SpottyHead, Symbol::SpottyLegs),
];

impl Symbol {
    /// Every symbol, heads before legs within each colour
    pub const ALL: [Symbol; 8] = [
        Symbol::GreenHead,
        Symbol::GreenLegs,
        Symbol::YellowHead,
        Symbol::YellowLegs,
        Symbol::StripeyHead,
        Symbol::StripeyLegs,
        Symbol::SpottyHead,
        Symbol::SpottyLegs,
    ];

    /// Check whether two edges placed against each other complete a frog
    pub fn is_compatible_with(self, other: Symbol) -> bool {
        PAIRS
            .iter()
            .any(|&(a, b)| (a == self && b == other) || (a == other && b == self))
    }

    /// The symbol this one pairs with
    pub fn complement(self) -> Symbol {
        match self {
            Symbol::GreenHead => Symbol::GreenLegs,
            Symbol::GreenLegs => Symbol::GreenHead,
            Symbol::YellowHead => Symbol::YellowLegs,
            Symbol::YellowLegs => Symbol::YellowHead,
            Symbol::StripeyHead => Symbol::StripeyLegs,
            Symbol::StripeyLegs => Symbol::StripeyHead,
            Symbol::SpottyHead => Symbol::SpottyLegs,
            Symbol::SpottyLegs => Symbol::SpottyHead,
        }
    }

    /// Two-letter code used in compact board output
    pub fn code(self) -> &'static str {
        match self {
            Symbol::GreenHead => "GH",
            Symbol::GreenLegs => "GL",
            Symbol::YellowHead => "YH",
            Symbol::YellowLegs => "YL",
            Symbol::StripeyHead => "SH",
            Symbol::StripeyLegs => "SL",
            Symbol::SpottyHead => "PH",
            Symbol::SpottyLegs => "PL",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::GreenHead => "Green Head",
            Symbol::GreenLegs => "Green Legs",
            Symbol::YellowHead => "Yellow Head",
            Symbol::YellowLegs => "Yellow Legs",
            Symbol::StripeyHead => "Stripey Head",
            Symbol::StripeyLegs => "Stripey Legs",
            Symbol::SpottyHead => "Spotty Head",
            Symbol::SpottyLegs => "Spotty Legs",
        };
        write!(f, "{}", name)
    }
}
