//! Winner advancement: mapping a completed match onto its slot in the next
//! round.

use super::errors::{BracketError, BracketResult};
use super::models::{Match, MatchStatus, ParticipantId, Slot};

/// Next-round match fed by the given 1-based `match_number`.
///
/// Feeders `2k-1` and `2k` both target match `k`.
pub fn next_match_number(match_number: i32) -> i32 {
    (match_number + 1) / 2
}

/// Which side of the target match the arriving winner takes: the first empty
/// side, so whichever feeder completes first lands in slot 1.
pub fn fill_side(next: &Match) -> Slot {
    if next.participant1_id.is_none() {
        Slot::First
    } else {
        Slot::Second
    }
}

/// Reject result reports for matches that already have one.
pub fn ensure_pending(m: &Match) -> BracketResult<()> {
    if m.status == MatchStatus::Completed {
        return Err(BracketError::AlreadyCompleted(m.id));
    }
    Ok(())
}

/// Reject winners that are not one of the match's participants.
pub fn validate_winner(m: &Match, winner_id: ParticipantId) -> BracketResult<()> {
    if m.participant1_id == Some(winner_id) || m.participant2_id == Some(winner_id) {
        Ok(())
    } else {
        Err(BracketError::InvalidWinner {
            match_id: m.id,
            winner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(p1: Option<i64>, p2: Option<i64>, status: MatchStatus) -> Match {
        Match {
            id: 10,
            tournament_id: 1,
            round_number: 1,
            match_number: 3,
            participant1_id: p1,
            participant2_id: p2,
            winner_id: None,
            score: None,
            status,
        }
    }

    #[test]
    fn feeder_pairs_share_a_target() {
        assert_eq!(next_match_number(1), 1);
        assert_eq!(next_match_number(2), 1);
        assert_eq!(next_match_number(3), 2);
        assert_eq!(next_match_number(4), 2);
        assert_eq!(next_match_number(7), 4);
        assert_eq!(next_match_number(8), 4);
    }

    #[test]
    fn first_empty_side_wins() {
        let empty = sample_match(None, None, MatchStatus::Pending);
        assert_eq!(fill_side(&empty), Slot::First);

        let half = sample_match(Some(7), None, MatchStatus::Pending);
        assert_eq!(fill_side(&half), Slot::Second);
    }

    #[test]
    fn pending_guard_rejects_completed_matches() {
        let done = sample_match(Some(1), Some(2), MatchStatus::Completed);
        assert!(matches!(
            ensure_pending(&done),
            Err(BracketError::AlreadyCompleted(10))
        ));

        let open = sample_match(Some(1), Some(2), MatchStatus::Pending);
        assert!(ensure_pending(&open).is_ok());
    }

    #[test]
    fn winner_must_play_in_the_match() {
        let m = sample_match(Some(1), Some(2), MatchStatus::Pending);
        assert!(validate_winner(&m, 1).is_ok());
        assert!(validate_winner(&m, 2).is_ok());
        assert!(matches!(
            validate_winner(&m, 3),
            Err(BracketError::InvalidWinner {
                match_id: 10,
                winner_id: 3
            })
        ));
    }

    #[test]
    fn bye_match_accepts_only_the_present_participant() {
        let bye = sample_match(Some(5), None, MatchStatus::Pending);
        assert!(validate_winner(&bye, 5).is_ok());
        assert!(validate_winner(&bye, 6).is_err());
    }
}
