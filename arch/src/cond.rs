use strum::Display;

/// Condition codes used by `setcc` and `jcc`, evaluated on signed operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Cond {
    E,
    NE,
    L,
    G,
}

impl Cond {
    /// Outcome of `cmp lhs, rhs` followed by this condition.
    pub fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Cond::E => lhs == rhs,
            Cond::NE => lhs != rhs,
            Cond::L => lhs < rhs,
            Cond::G => lhs > rhs,
        }
    }
}

#[test]
fn test() {
    assert!(Cond::E.holds(3, 3));
    assert!(Cond::NE.holds(3, 4));
    assert!(Cond::L.holds(-5, 2));
    assert!(!Cond::L.holds(2, 2));
    assert!(Cond::G.holds(2, -5));
    assert_eq!(Cond::NE.to_string(), "ne");
}
