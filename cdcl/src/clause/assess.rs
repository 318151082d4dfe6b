//! Tier assignment for newly learnt clauses.

use crate::clause::Tier;

/// Pick the tier a freshly learnt clause enters, based on its LBD.
///
/// Low-LBD clauses are kept permanently (`Core`); moderate-LBD clauses start out in `Mid` and may
/// later be demoted; everything else starts in `Local`, where it is subject to forgetting.
pub fn select_tier(lbd: u32) -> Tier {
    if lbd <= 3 {
        Tier::Core
    } else if lbd <= 6 {
        Tier::Mid
    } else {
        Tier::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(select_tier(1), Tier::Core);
        assert_eq!(select_tier(3), Tier::Core);
        assert_eq!(select_tier(4), Tier::Mid);
        assert_eq!(select_tier(6), Tier::Mid);
        assert_eq!(select_tier(7), Tier::Local);
        assert_eq!(select_tier(1000), Tier::Local);
    }
}
