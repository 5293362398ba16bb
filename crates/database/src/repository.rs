use crate::DbError;
use core_types::{
    CreatedHeroPower, HeroDetail, HeroPowerDetail, HeroSummary, NewHero, NewHeroPower, NewPower,
    PowerSummary, validate_description,
};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{Executor, FromRow};

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

// This struct represents a row fetched from the heroes table.
#[derive(FromRow, Debug, Clone)]
struct DbHero {
    id: i64,
    name: Option<String>,
    super_name: String,
}

#[derive(FromRow, Debug, Clone)]
struct DbPower {
    id: i64,
    name: String,
    description: String,
}

/// A `hero_powers` row joined with the power it points at.
#[derive(FromRow, Debug, Clone)]
struct DbHeroPowerWithPower {
    id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
    power_name: String,
    power_description: String,
}

impl From<DbHero> for HeroSummary {
    fn from(row: DbHero) -> Self {
        HeroSummary {
            id: row.id,
            name: row.name,
            super_name: row.super_name,
        }
    }
}

impl From<DbPower> for PowerSummary {
    fn from(row: DbPower) -> Self {
        PowerSummary {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl From<DbHeroPowerWithPower> for HeroPowerDetail {
    fn from(row: DbHeroPowerWithPower) -> Self {
        HeroPowerDetail {
            id: row.id,
            strength: row.strength,
            hero_id: row.hero_id,
            power_id: row.power_id,
            power: PowerSummary {
                id: row.power_id,
                name: row.power_name,
                description: row.power_description,
            },
        }
    }
}

pub(crate) async fn fetch_hero<'e, E>(executor: E, id: i64) -> Result<HeroSummary, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let hero = sqlx::query_as::<_, DbHero>("SELECT id, name, super_name FROM heroes WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(DbError::from_lookup)?;
    Ok(hero.into())
}

pub(crate) async fn fetch_power<'e, E>(executor: E, id: i64) -> Result<PowerSummary, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let power =
        sqlx::query_as::<_, DbPower>("SELECT id, name, description FROM powers WHERE id = ?")
            .bind(id)
            .fetch_one(executor)
            .await
            .map_err(DbError::from_lookup)?;
    Ok(power.into())
}

pub(crate) async fn insert_hero<'e, E>(executor: E, hero: &NewHero) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO heroes (name, super_name) VALUES (?, ?)")
        .bind(hero.name.as_deref())
        .bind(&hero.super_name)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Validates the description before anything is written.
pub(crate) async fn insert_power<'e, E>(executor: E, power: &NewPower) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    power.validate()?;
    let result = sqlx::query("INSERT INTO powers (name, description) VALUES (?, ?)")
        .bind(&power.name)
        .bind(&power.description)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub(crate) async fn insert_hero_power<'e, E>(
    executor: E,
    hero_power: &NewHeroPower,
) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result =
        sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?)")
            .bind(hero_power.strength.as_str())
            .bind(hero_power.hero_id)
            .bind(hero_power.power_id)
            .execute(executor)
            .await?;
    Ok(result.last_insert_rowid())
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetches every hero in insertion (id) order.
    pub async fn get_all_heroes(&self) -> Result<Vec<HeroSummary>, DbError> {
        let heroes = sqlx::query_as::<_, DbHero>(
            "SELECT id, name, super_name FROM heroes ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(heroes.into_iter().map(HeroSummary::from).collect())
    }

    pub async fn get_hero(&self, id: i64) -> Result<HeroSummary, DbError> {
        fetch_hero(&self.pool, id).await
    }

    /// Fetches a hero together with its linking records, each joined with
    /// the power it grants.
    pub async fn get_hero_detail(&self, id: i64) -> Result<HeroDetail, DbError> {
        let hero = fetch_hero(&self.pool, id).await?;

        let hero_powers = sqlx::query_as::<_, DbHeroPowerWithPower>(
            r#"
            SELECT
                hp.id, hp.strength, hp.hero_id, hp.power_id,
                p.name AS power_name, p.description AS power_description
            FROM
                hero_powers AS hp
            JOIN
                powers AS p ON p.id = hp.power_id
            WHERE
                hp.hero_id = ?
            ORDER BY
                hp.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(HeroDetail::new(
            hero,
            hero_powers.into_iter().map(HeroPowerDetail::from).collect(),
        ))
    }

    /// Fetches every power in insertion (id) order.
    pub async fn get_all_powers(&self) -> Result<Vec<PowerSummary>, DbError> {
        let powers = sqlx::query_as::<_, DbPower>(
            "SELECT id, name, description FROM powers ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(powers.into_iter().map(PowerSummary::from).collect())
    }

    pub async fn get_power(&self, id: i64) -> Result<PowerSummary, DbError> {
        fetch_power(&self.pool, id).await
    }

    /// Replaces a power's description.
    ///
    /// The power is looked up first so a missing id reports `NotFound` even
    /// when the new description is also invalid. Nothing is committed unless
    /// the description passes validation and the update succeeds.
    pub async fn update_power_description(
        &self,
        id: i64,
        description: &str,
    ) -> Result<PowerSummary, DbError> {
        let mut tx = self.pool.begin().await?;

        let power = fetch_power(&mut *tx, id).await?;
        validate_description(description)?;

        sqlx::query("UPDATE powers SET description = ? WHERE id = ?")
            .bind(description)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(power_id = id, "Power description updated.");

        Ok(PowerSummary {
            description: description.to_string(),
            ..power
        })
    }

    /// Inserts a linking record and reads it back with both parents, all
    /// within a single transaction.
    pub async fn create_hero_power(
        &self,
        hero_power: &NewHeroPower,
    ) -> Result<CreatedHeroPower, DbError> {
        let mut tx = self.pool.begin().await?;

        let id = insert_hero_power(&mut *tx, hero_power).await?;
        let hero = fetch_hero(&mut *tx, hero_power.hero_id).await?;
        let power = fetch_power(&mut *tx, hero_power.power_id).await?;

        tx.commit().await?;
        tracing::info!(
            hero_power_id = id,
            hero_id = hero.id,
            power_id = power.id,
            "Hero power created."
        );

        Ok(CreatedHeroPower {
            id,
            strength: hero_power.strength.to_string(),
            hero_id: hero.id,
            power_id: power.id,
            hero,
            power,
        })
    }

    /// Administrative insert; not reachable over HTTP.
    pub async fn create_hero(&self, hero: &NewHero) -> Result<HeroSummary, DbError> {
        let id = insert_hero(&self.pool, hero).await?;
        Ok(HeroSummary {
            id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
        })
    }

    /// Administrative insert; not reachable over HTTP.
    pub async fn create_power(&self, power: &NewPower) -> Result<PowerSummary, DbError> {
        let id = insert_power(&self.pool, power).await?;
        Ok(PowerSummary {
            id,
            name: power.name.clone(),
            description: power.description.clone(),
        })
    }

    /// Deletes a power. Its linking records go with it.
    pub async fn delete_power(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM powers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Deletes a hero. Its linking records go with it.
    pub async fn delete_hero(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
