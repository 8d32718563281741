use std::ops::Not;

/// A lifted boolean: `bool` extended with an undefined value.
///
/// Used for partial valuations, user polarity suggestions, and solve
/// verdicts (true: satisfiable, false: unsatisfiable, undefined:
/// interrupted or out of budget).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LBool {
    True,
    False,
    #[default]
    Undef,
}

impl LBool {
    pub fn from_bool(value: bool) -> Self {
        match value {
            true => LBool::True,
            false => LBool::False,
        }
    }
}

impl Not for LBool {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            LBool::True => LBool::False,
            LBool::False => LBool::True,
            LBool::Undef => LBool::Undef,
        }
    }
}

impl std::fmt::Display for LBool {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LBool::True => write!(f, "true"),
            LBool::False => write!(f, "false"),
            LBool::Undef => write!(f, "undef"),
        }
    }
}
