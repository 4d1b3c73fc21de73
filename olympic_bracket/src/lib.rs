//! # Olympic Bracket
//!
//! A single-elimination ("olympic") tournament bracket engine with a
//! PostgreSQL-backed store.
//!
//! Given an ordered roster, the bracket builder pads to the next power of two
//! with byes, seeds round 1 in roster order, and creates empty placeholder
//! matches for every later round up front. Reporting a match result marks the
//! match completed and advances the winner into the first empty slot of the
//! correct next-round match, all within one transaction.
//!
//! ## Core modules
//!
//! - [`bracket`]: builder, advancement engine, models, and the store manager
//! - [`db`]: PostgreSQL connection pooling and configuration
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use olympic_bracket::bracket::{BracketManager, NewTournament};
//! use olympic_bracket::db::{Database, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let brackets = BracketManager::new(Arc::new(db.pool().clone()));
//!
//!     let created = brackets
//!         .create_tournament(NewTournament {
//!             name: "City Open".to_string(),
//!             weight_category: "-73kg".to_string(),
//!             age_category: "Seniors".to_string(),
//!             participants: vec!["Aliev".into(), "Borisov".into(), "Ganiev".into()],
//!         })
//!         .await?;
//!     println!("created tournament {}", created.tournament_id);
//!     Ok(())
//! }
//! ```

/// Bracket construction, advancement, and the store-backed manager.
pub mod bracket;
pub use bracket::{BracketError, BracketManager, BracketResult};

/// PostgreSQL connection pooling and configuration.
pub mod db;
pub use db::{Database, DatabaseConfig};
