use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::config::sports::Sport;
use crate::db::score_store::{GameFilter, ScoreStore, SortOrder, StoreError};
use crate::models::game::{GameRecord, NormalizedGame};

const RECORD_COLUMNS: &str =
    "id, sport, league, home_team, away_team, home_score, away_score, status, start_time, last_updated";

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Postgres-backed store over one sport's table.
#[derive(Debug, Clone)]
pub struct PgScoreStore {
    pool: PgPool,
    table: &'static str,
}

impl PgScoreStore {
    pub fn new(pool: PgPool, sport: Sport) -> Self {
        Self {
            pool,
            table: sport.collection(),
        }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    async fn upsert(
        &self,
        game: &NormalizedGame,
        last_updated: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError> {
        debug!("Upserting {} vs {} into {}", game.home_team, game.away_team, self.table);

        // `table` only ever comes from `Sport::collection`
        let statement = format!(
            r#"
            INSERT INTO {table} ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (sport, home_team, away_team) DO UPDATE
            SET
                league = EXCLUDED.league,
                home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                status = EXCLUDED.status,
                start_time = EXCLUDED.start_time,
                last_updated = EXCLUDED.last_updated
            RETURNING {columns}
            "#,
            table = self.table,
            columns = RECORD_COLUMNS,
        );

        let record = sqlx::query_as::<_, GameRecord>(&statement)
            .bind(Uuid::new_v4())
            .bind(&game.sport)
            .bind(&game.league)
            .bind(&game.home_team)
            .bind(&game.away_team)
            .bind(game.home_score)
            .bind(game.away_score)
            .bind(&game.status)
            .bind(game.start_time)
            .bind(last_updated)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find(
        &self,
        filter: &GameFilter,
        order: SortOrder,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE TRUE",
            RECORD_COLUMNS, self.table
        ));

        if let Some(sport) = &filter.sport {
            builder.push(" AND sport = ").push_bind(sport.clone());
        }
        if let Some(range) = &filter.start_time {
            builder
                .push(" AND start_time >= ")
                .push_bind(range.start)
                .push(" AND start_time <= ")
                .push_bind(range.end);
        }

        builder.push(match order {
            SortOrder::Ascending => " ORDER BY start_time ASC NULLS LAST",
            SortOrder::Descending => " ORDER BY start_time DESC NULLS LAST",
        });

        let records = builder
            .build_query_as::<GameRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {}", self.table))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
