use serde::Serialize;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

struct DemoGame {
    name: &'static str,
    detail: &'static str,
    coverimage: &'static str,
}

/// Demo catalog rows. Nine entries so the list spans two pages.
const DEMO_GAMES: &[DemoGame] = &[
    DemoGame {
        name: "Chess",
        detail: "Classic two-player strategy on an 8x8 board.",
        coverimage: "https://img.gamedeck.dev/chess.jpg",
    },
    DemoGame {
        name: "Checkers",
        detail: "Diagonal captures and kings on the back row.",
        coverimage: "https://img.gamedeck.dev/checkers.jpg",
    },
    DemoGame {
        name: "Go",
        detail: "Surround territory on a 19x19 grid.",
        coverimage: "https://img.gamedeck.dev/go.jpg",
    },
    DemoGame {
        name: "Backgammon",
        detail: "Race your checkers home with a pair of dice.",
        coverimage: "https://img.gamedeck.dev/backgammon.jpg",
    },
    DemoGame {
        name: "Mahjong",
        detail: "Tile-matching for four players.",
        coverimage: "https://img.gamedeck.dev/mahjong.jpg",
    },
    DemoGame {
        name: "Shogi",
        detail: "Japanese chess with piece drops.",
        coverimage: "https://img.gamedeck.dev/shogi.jpg",
    },
    DemoGame {
        name: "Xiangqi",
        detail: "Chinese chess across the river.",
        coverimage: "https://img.gamedeck.dev/xiangqi.jpg",
    },
    DemoGame {
        name: "Reversi",
        detail: "Flip discs to claim the board.",
        coverimage: "https://img.gamedeck.dev/reversi.jpg",
    },
    DemoGame { name: "Mancala", detail: "Sow seeds around the pits.", coverimage: "" },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    pub inserted: usize,
    pub already_present: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub all_present: bool,
    pub missing: Vec<&'static str>,
}

pub struct DemoCatalog;

impl DemoCatalog {
    pub fn names() -> impl Iterator<Item = &'static str> {
        DEMO_GAMES.iter().map(|game| game.name)
    }

    /// Insert every demo game whose name is not already in the table.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for game in DEMO_GAMES {
            let result = sqlx::query(
                "INSERT INTO games (name, detail, coverimage)
                 SELECT ?1, ?2, ?3
                 WHERE NOT EXISTS (SELECT 1 FROM games WHERE name = ?1)",
            )
            .bind(game.name)
            .bind(game.detail)
            .bind(game.coverimage)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;

        Ok(SeedResult { inserted, already_present: DEMO_GAMES.len() - inserted })
    }

    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut missing = Vec::new();

        for game in DEMO_GAMES {
            let present: i64 =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM games WHERE name = ?1)")
                    .bind(game.name)
                    .fetch_one(pool)
                    .await?;
            if present != 1 {
                missing.push(game.name);
            }
        }

        Ok(VerificationResult { all_present: missing.is_empty(), missing })
    }
}
