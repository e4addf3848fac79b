use std::fmt;
use std::str::FromStr;

/// Ordered access tier. `Member` is the highest and always wins ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Visitor,
    Quick,
    Lead,
    Member,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Quick => "quick",
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }

    /// True when this tier satisfies the given requirement.
    #[must_use]
    pub fn meets(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "visitor" => Ok(Self::Visitor),
            "quick" => Ok(Self::Quick),
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            _ => Err(()),
        }
    }
}

/// Resolve the effective tier from the locally stored tag and the
/// server-confirmed login state. A confirmed login forces at least `Member`.
#[must_use]
pub fn effective_role(stored: Tier, server_confirmed: bool) -> Tier {
    if server_confirmed {
        stored.max(Tier::Member)
    } else {
        stored
    }
}
