use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Comparison operators used by select predicates and joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Comparison {
    pub const ALL: [Comparison; 6] = [
        Comparison::Eq,
        Comparison::Ne,
        Comparison::Lt,
        Comparison::Gt,
        Comparison::Le,
        Comparison::Ge,
    ];

    /// Tests `candidate OP bound`.
    ///
    /// The bound value is the one the comparator was built around (the select
    /// literal, the outer row of a nested loop, the build row of a hash join);
    /// the candidate is the value being checked against it.
    ///
    /// ```
    /// use colstore::Comparison;
    ///
    /// assert!(Comparison::Lt.holds(&3, &10));
    /// assert!(!Comparison::Lt.holds(&10, &3));
    /// assert!(Comparison::Le.holds("Meyer", "Meyer"));
    /// ```
    pub fn holds<T: PartialOrd + ?Sized>(self, candidate: &T, bound: &T) -> bool {
        match self {
            Self::Eq => candidate == bound,
            Self::Ne => candidate != bound,
            Self::Lt => candidate < bound,
            Self::Gt => candidate > bound,
            Self::Le => candidate <= bound,
            Self::Ge => candidate >= bound,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

impl FromStr for Comparison {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmp| cmp.symbol() == s)
            .or_else(|| (s == "=").then_some(Self::Eq))
            .ok_or_else(|| StoreError::UnknownComparison(s.to_string()))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
