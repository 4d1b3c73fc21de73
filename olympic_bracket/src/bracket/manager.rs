//! Store-backed bracket manager.
//!
//! All mutation runs inside a single transaction per invocation: bracket
//! creation (tournament + participants + every match) is one atomic unit,
//! and a result report plus its downstream slot fill is another. The
//! transaction handle is scoped to the method and rolls back on every
//! failure path.

use std::sync::Arc;

use log::{debug, info};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::builder;
use super::engine;
use super::errors::{BracketError, BracketResult};
use super::models::{
    AdvanceOutcome, BYE, CreatedBracket, Match, MatchId, MatchStatus, MatchView, NewTournament,
    Participant, ParticipantId, SeededMatch, Slot, SlotRef, Tournament, TournamentBracket,
    TournamentId, TournamentStatus,
};

/// Bracket manager
#[derive(Clone)]
pub struct BracketManager {
    pool: Arc<PgPool>,
}

impl BracketManager {
    /// Create a new bracket manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a tournament, its roster, and the full bracket.
    ///
    /// Round 1 is seeded in roster order with byes padding to the next power
    /// of two; rounds 2 and later are created as empty placeholders. Partial
    /// brackets are never observable: any failure rolls the whole unit back.
    pub async fn create_tournament(&self, input: NewTournament) -> BracketResult<CreatedBracket> {
        let plan = builder::plan_bracket(input.participants.len())?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO tournaments (name, weight_category, age_category, total_participants, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.weight_category)
        .bind(&input.age_category)
        .bind(input.participants.len() as i32)
        .bind(TournamentStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;
        let tournament_id: TournamentId = row.get("id");

        let mut roster: Vec<(ParticipantId, String)> = Vec::with_capacity(input.participants.len());
        for (idx, name) in input.participants.iter().enumerate() {
            let row = sqlx::query(
                r#"
                INSERT INTO participants (tournament_id, name, seed_number, weight_category, age_category)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(tournament_id)
            .bind(name)
            .bind(idx as i32 + 1)
            .bind(&input.weight_category)
            .bind(&input.age_category)
            .fetch_one(&mut *tx)
            .await?;
            roster.push((row.get("id"), name.clone()));
        }

        let mut matches = Vec::with_capacity(plan.first_round.len());
        for pairing in &plan.first_round {
            let side1 = pairing.seat1.map(|i| &roster[i]);
            let side2 = pairing.seat2.map(|i| &roster[i]);

            let row = sqlx::query(
                r#"
                INSERT INTO matches (tournament_id, round_number, match_number, participant1_id, participant2_id, status)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(tournament_id)
            .bind(1i32)
            .bind(pairing.match_number)
            .bind(side1.map(|(id, _)| *id))
            .bind(side2.map(|(id, _)| *id))
            .bind(MatchStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await?;

            matches.push(SeededMatch {
                id: row.get("id"),
                round_number: 1,
                match_number: pairing.match_number,
                participant1: side1
                    .map(|(_, name)| name.clone())
                    .unwrap_or_else(|| BYE.to_string()),
                participant2: side2
                    .map(|(_, name)| name.clone())
                    .unwrap_or_else(|| BYE.to_string()),
            });
        }

        for placeholder in &plan.placeholders {
            sqlx::query(
                r#"
                INSERT INTO matches (tournament_id, round_number, match_number, status)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(tournament_id)
            .bind(placeholder.round_number)
            .bind(placeholder.match_number)
            .bind(MatchStatus::Pending.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "created tournament {} with {} participants across {} rounds",
            tournament_id,
            input.participants.len(),
            plan.shape.num_rounds
        );

        Ok(CreatedBracket {
            tournament_id,
            matches,
        })
    }

    /// Record a match result and advance the winner into the next round.
    ///
    /// The result write and the downstream slot fill are one transaction;
    /// the reported and target rows are locked for its duration so
    /// concurrent feeder completions serialize on "which side is still
    /// empty". Re-reporting a completed match is rejected, and the winner
    /// must be one of the match's participants.
    pub async fn report_result(
        &self,
        match_id: MatchId,
        winner_id: ParticipantId,
        score: Option<String>,
    ) -> BracketResult<AdvanceOutcome> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query(
            r#"
            SELECT id, tournament_id, round_number, match_number,
                   participant1_id, participant2_id, winner_id, score, status
            FROM matches
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .map(|row| match_from_row(&row))
        .ok_or(BracketError::MatchNotFound(match_id))?;

        engine::ensure_pending(&current)?;
        engine::validate_winner(&current, winner_id)?;

        sqlx::query("UPDATE matches SET winner_id = $1, score = $2, status = $3 WHERE id = $4")
            .bind(winner_id)
            .bind(&score)
            .bind(MatchStatus::Completed.as_str())
            .bind(match_id)
            .execute(&mut *tx)
            .await?;

        let next = sqlx::query(
            r#"
            SELECT id, tournament_id, round_number, match_number,
                   participant1_id, participant2_id, winner_id, score, status
            FROM matches
            WHERE tournament_id = $1 AND round_number = $2 AND match_number = $3
            FOR UPDATE
            "#,
        )
        .bind(current.tournament_id)
        .bind(current.round_number + 1)
        .bind(engine::next_match_number(current.match_number))
        .fetch_optional(&mut *tx)
        .await?
        .map(|row| match_from_row(&row));

        let advanced_to = match next {
            Some(next_match) => {
                let slot = engine::fill_side(&next_match);
                let sql = match slot {
                    Slot::First => "UPDATE matches SET participant1_id = $1 WHERE id = $2",
                    Slot::Second => "UPDATE matches SET participant2_id = $1 WHERE id = $2",
                };
                sqlx::query(sql)
                    .bind(winner_id)
                    .bind(next_match.id)
                    .execute(&mut *tx)
                    .await?;

                Some(SlotRef {
                    match_id: next_match.id,
                    round_number: next_match.round_number,
                    match_number: next_match.match_number,
                    slot,
                })
            }
            // No next round: the reported match was the final.
            None => None,
        };

        tx.commit().await?;

        match &advanced_to {
            Some(slot) => debug!(
                "match {}: winner {} advanced to round {} match {}",
                match_id, winner_id, slot.round_number, slot.match_number
            ),
            None => info!(
                "tournament {}: championship decided by match {}",
                current.tournament_id, match_id
            ),
        }

        Ok(AdvanceOutcome {
            tournament_id: current.tournament_id,
            round_number: current.round_number,
            match_number: current.match_number,
            winner_id,
            advanced_to,
        })
    }

    /// Get tournament header information
    pub async fn get_tournament(&self, id: TournamentId) -> BracketResult<Tournament> {
        let row = sqlx::query(
            r#"
            SELECT id, name, weight_category, age_category, total_participants, status, created_at
            FROM tournaments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(BracketError::TournamentNotFound(id))?;

        Ok(tournament_from_row(&row))
    }

    /// Tournament plus its full bracket with participant names joined in,
    /// ordered by round then match number.
    pub async fn tournament_bracket(&self, id: TournamentId) -> BracketResult<TournamentBracket> {
        let tournament = self.get_tournament(id).await?;

        let rows = sqlx::query(
            r#"
            SELECT m.id, m.round_number, m.match_number,
                   p1.name AS participant1, p2.name AS participant2,
                   w.name AS winner, m.score, m.status
            FROM matches m
            LEFT JOIN participants p1 ON m.participant1_id = p1.id
            LEFT JOIN participants p2 ON m.participant2_id = p2.id
            LEFT JOIN participants w ON m.winner_id = w.id
            WHERE m.tournament_id = $1
            ORDER BY m.round_number, m.match_number
            "#,
        )
        .bind(id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let matches = rows
            .iter()
            .map(|row| MatchView {
                id: row.get("id"),
                round_number: row.get("round_number"),
                match_number: row.get("match_number"),
                participant1: row.get("participant1"),
                participant2: row.get("participant2"),
                winner: row.get("winner"),
                score: row.get("score"),
                status: MatchStatus::parse(row.get::<String, _>("status").as_str()),
            })
            .collect();

        Ok(TournamentBracket {
            tournament,
            matches,
        })
    }

    /// List tournaments, newest first.
    pub async fn list_tournaments(&self, limit: i64) -> BracketResult<Vec<Tournament>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, weight_category, age_category, total_participants, status, created_at
            FROM tournaments
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(tournament_from_row).collect())
    }

    /// Roster for one tournament in seed order.
    pub async fn list_participants(
        &self,
        tournament_id: TournamentId,
    ) -> BracketResult<Vec<Participant>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tournament_id, name, seed_number, weight_category, age_category
            FROM participants
            WHERE tournament_id = $1
            ORDER BY seed_number
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let participants = rows
            .iter()
            .map(|row| Participant {
                id: row.get("id"),
                tournament_id: row.get("tournament_id"),
                name: row.get("name"),
                seed_number: row.get("seed_number"),
                weight_category: row.get("weight_category"),
                age_category: row.get("age_category"),
            })
            .collect();

        Ok(participants)
    }

    /// Raw match rows for one tournament in bracket order.
    pub async fn list_matches(&self, tournament_id: TournamentId) -> BracketResult<Vec<Match>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tournament_id, round_number, match_number,
                   participant1_id, participant2_id, winner_id, score, status
            FROM matches
            WHERE tournament_id = $1
            ORDER BY round_number, match_number
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(match_from_row).collect())
    }

    /// Look up one match by its bracket coordinates.
    pub async fn get_match(
        &self,
        tournament_id: TournamentId,
        round_number: i32,
        match_number: i32,
    ) -> BracketResult<Option<Match>> {
        let row = sqlx::query(
            r#"
            SELECT id, tournament_id, round_number, match_number,
                   participant1_id, participant2_id, winner_id, score, status
            FROM matches
            WHERE tournament_id = $1 AND round_number = $2 AND match_number = $3
            "#,
        )
        .bind(tournament_id)
        .bind(round_number)
        .bind(match_number)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| match_from_row(&r)))
    }
}

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        weight_category: row.get("weight_category"),
        age_category: row.get("age_category"),
        total_participants: row.get("total_participants"),
        status: TournamentStatus::parse(row.get::<String, _>("status").as_str()),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        tournament_id: row.get("tournament_id"),
        round_number: row.get("round_number"),
        match_number: row.get("match_number"),
        participant1_id: row.get("participant1_id"),
        participant2_id: row.get("participant2_id"),
        winner_id: row.get("winner_id"),
        score: row.get("score"),
        status: MatchStatus::parse(row.get::<String, _>("status").as_str()),
    }
}
