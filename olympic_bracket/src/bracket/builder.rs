//! Bracket construction: sizing math, round-1 seeding, and placeholder
//! rounds.
//!
//! Everything here is pure computation over roster positions; the manager
//! maps the resulting plan onto persisted participant records.

use super::errors::{BracketError, BracketResult};

/// Dimensions of a bracket padded to the next power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketShape {
    /// Number of rounds, `ceil(log2(entrants))`.
    pub num_rounds: u32,
    /// Total round-1 positions, `2^num_rounds`.
    pub total_slots: u32,
}

impl BracketShape {
    /// Number of matches in the given 1-based round.
    pub fn matches_in_round(&self, round: u32) -> u32 {
        self.total_slots >> round
    }

    /// Total matches across all rounds.
    pub fn total_matches(&self) -> u32 {
        self.total_slots - 1
    }
}

/// Round-1 pairing of 0-based roster positions. `None` is a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstRoundPairing {
    pub match_number: i32,
    pub seat1: Option<usize>,
    pub seat2: Option<usize>,
}

/// An empty match created up front for rounds 2 and later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch {
    pub round_number: i32,
    pub match_number: i32,
}

/// A complete construction plan for one bracket.
#[derive(Debug, Clone)]
pub struct BracketPlan {
    pub shape: BracketShape,
    pub first_round: Vec<FirstRoundPairing>,
    pub placeholders: Vec<PlaceholderMatch>,
}

/// Compute bracket dimensions for the given roster size.
///
/// Sizing is exact integer arithmetic: the roster is padded to the next
/// power of two, so `num_rounds` is never off by one at boundaries like
/// 4, 8, or 16 entrants.
pub fn bracket_shape(entrants: usize) -> BracketResult<BracketShape> {
    if entrants < 2 {
        return Err(BracketError::InvalidRoster { count: entrants });
    }

    let total_slots = entrants.next_power_of_two() as u32;
    let num_rounds = total_slots.trailing_zeros();

    Ok(BracketShape {
        num_rounds,
        total_slots,
    })
}

/// Plan a full bracket for `entrants` seeded in roster order.
///
/// Round 1 pairs adjacent roster positions `(0,1), (2,3), ...`; positions
/// past the roster become byes. Rounds 2 and later are emitted as empty
/// placeholders with dense 1-based match numbers. Byes are not resolved
/// here: a match with a single real participant stays pending until a
/// caller reports its winner.
pub fn plan_bracket(entrants: usize) -> BracketResult<BracketPlan> {
    let shape = bracket_shape(entrants)?;

    let mut first_round = Vec::with_capacity((shape.total_slots / 2) as usize);
    for i in (0..shape.total_slots as usize).step_by(2) {
        first_round.push(FirstRoundPairing {
            match_number: (i / 2 + 1) as i32,
            seat1: (i < entrants).then_some(i),
            seat2: (i + 1 < entrants).then_some(i + 1),
        });
    }

    let mut placeholders = Vec::new();
    for round in 2..=shape.num_rounds {
        for match_number in 1..=shape.matches_in_round(round) {
            placeholders.push(PlaceholderMatch {
                round_number: round as i32,
                match_number: match_number as i32,
            });
        }
    }

    Ok(BracketPlan {
        shape,
        first_round,
        placeholders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_rejects_small_rosters() {
        assert!(matches!(
            bracket_shape(0),
            Err(BracketError::InvalidRoster { count: 0 })
        ));
        assert!(matches!(
            bracket_shape(1),
            Err(BracketError::InvalidRoster { count: 1 })
        ));
    }

    #[test]
    fn shape_is_exact_at_powers_of_two() {
        for (entrants, rounds, slots) in [(2, 1, 2), (4, 2, 4), (8, 3, 8), (16, 4, 16)] {
            let shape = bracket_shape(entrants).unwrap();
            assert_eq!(shape.num_rounds, rounds, "entrants={entrants}");
            assert_eq!(shape.total_slots, slots, "entrants={entrants}");
        }
    }

    #[test]
    fn shape_pads_to_next_power_of_two() {
        for (entrants, rounds, slots) in [(3, 2, 4), (5, 3, 8), (9, 4, 16), (17, 5, 32)] {
            let shape = bracket_shape(entrants).unwrap();
            assert_eq!(shape.num_rounds, rounds, "entrants={entrants}");
            assert_eq!(shape.total_slots, slots, "entrants={entrants}");
        }
    }

    #[test]
    fn eight_entrant_plan_has_no_byes() {
        let plan = plan_bracket(8).unwrap();

        assert_eq!(plan.first_round.len(), 4);
        assert!(
            plan.first_round
                .iter()
                .all(|p| p.seat1.is_some() && p.seat2.is_some())
        );
        // Rounds 2 and 3: two semifinals plus the final.
        assert_eq!(plan.placeholders.len(), 3);
    }

    #[test]
    fn five_entrant_plan_matches_expected_layout() {
        let plan = plan_bracket(5).unwrap();

        assert_eq!(plan.shape.num_rounds, 3);
        assert_eq!(plan.shape.total_slots, 8);
        assert_eq!(plan.first_round.len(), 4);

        assert_eq!(plan.first_round[0].seat1, Some(0));
        assert_eq!(plan.first_round[0].seat2, Some(1));
        assert_eq!(plan.first_round[2].seat1, Some(4));
        assert_eq!(plan.first_round[2].seat2, None);
        // Positions 6 and 7 are both past the roster: the last pairing is
        // all byes and waits for the caller like any other match.
        assert_eq!(plan.first_round[3].seat1, None);
        assert_eq!(plan.first_round[3].seat2, None);

        let round2 = plan
            .placeholders
            .iter()
            .filter(|p| p.round_number == 2)
            .count();
        let round3 = plan
            .placeholders
            .iter()
            .filter(|p| p.round_number == 3)
            .count();
        assert_eq!(round2, 2);
        assert_eq!(round3, 1);
    }

    #[test]
    fn pairings_follow_roster_order() {
        let plan = plan_bracket(6).unwrap();

        for (idx, pairing) in plan.first_round.iter().enumerate() {
            assert_eq!(pairing.match_number as usize, idx + 1);
            if let Some(seat) = pairing.seat1 {
                assert_eq!(seat, idx * 2);
            }
            if let Some(seat) = pairing.seat2 {
                assert_eq!(seat, idx * 2 + 1);
            }
        }
    }

    #[test]
    fn total_matches_counts_every_round() {
        for entrants in [2usize, 3, 4, 5, 8, 9, 16, 33] {
            let plan = plan_bracket(entrants).unwrap();
            let total = plan.first_round.len() + plan.placeholders.len();
            assert_eq!(total as u32, plan.shape.total_matches(), "entrants={entrants}");
        }
    }

    #[test]
    fn two_entrant_bracket_is_a_single_final() {
        let plan = plan_bracket(2).unwrap();

        assert_eq!(plan.shape.num_rounds, 1);
        assert_eq!(plan.first_round.len(), 1);
        assert!(plan.placeholders.is_empty());
    }
}
