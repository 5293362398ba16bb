//! Sample data for local development.

use crate::DbError;
use crate::repository::{DbRepository, insert_hero, insert_hero_power, insert_power};
use core_types::{NewHero, NewHeroPower, NewPower, Strength};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const POWERS: [(&str, &str); 4] = [
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

const HEROES: [(&str, &str); 10] = [
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

/// Row counts written by a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

/// Wipes all three tables and inserts the sample roster, giving every hero
/// one randomly chosen power at a random strength.
pub async fn seed_database(repo: &DbRepository) -> Result<SeedReport, DbError> {
    seed_database_with(repo, &mut StdRng::from_entropy()).await
}

/// Same as [`seed_database`] with a caller-supplied random source. The whole
/// run is one transaction.
pub async fn seed_database_with<R>(repo: &DbRepository, rng: &mut R) -> Result<SeedReport, DbError>
where
    R: Rng + Send,
{
    let mut tx = repo.pool().begin().await?;

    tracing::info!("Clearing existing rows.");
    for statement in [
        "DELETE FROM hero_powers",
        "DELETE FROM heroes",
        "DELETE FROM powers",
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    let mut power_ids = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let power = NewPower {
            name: name.to_string(),
            description: description.to_string(),
        };
        power_ids.push(insert_power(&mut *tx, &power).await?);
    }

    let mut hero_ids = Vec::with_capacity(HEROES.len());
    for (name, super_name) in HEROES {
        let hero = NewHero {
            name: Some(name.to_string()),
            super_name: super_name.to_string(),
        };
        hero_ids.push(insert_hero(&mut *tx, &hero).await?);
    }

    let mut hero_powers = 0;
    for hero_id in &hero_ids {
        let Some(&power_id) = power_ids.choose(rng) else {
            continue;
        };
        let link = NewHeroPower {
            strength: Strength::ALL[rng.gen_range(0..Strength::ALL.len())],
            hero_id: *hero_id,
            power_id,
        };
        insert_hero_power(&mut *tx, &link).await?;
        hero_powers += 1;
    }

    tx.commit().await?;

    let report = SeedReport {
        heroes: hero_ids.len(),
        powers: power_ids.len(),
        hero_powers,
    };
    tracing::info!(?report, "Seeding complete.");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::memory_repo;

    #[tokio::test]
    async fn seeds_every_hero_with_one_power() {
        let repo = memory_repo().await;
        let report = seed_database_with(&repo, &mut StdRng::seed_from_u64(7))
            .await
            .unwrap();
        assert_eq!(
            report,
            SeedReport {
                heroes: 10,
                powers: 4,
                hero_powers: 10
            }
        );

        let heroes = repo.get_all_heroes().await.unwrap();
        assert_eq!(heroes[0].super_name, "Ms. Marvel");
        for hero in heroes {
            let detail = repo.get_hero_detail(hero.id).await.unwrap();
            assert_eq!(detail.hero_powers.len(), 1);
            assert!(Strength::parse(&detail.hero_powers[0].strength).is_ok());
        }
    }

    #[tokio::test]
    async fn reseeding_replaces_previous_rows() {
        let repo = memory_repo().await;
        seed_database_with(&repo, &mut StdRng::seed_from_u64(1)).await.unwrap();
        seed_database_with(&repo, &mut StdRng::seed_from_u64(2)).await.unwrap();

        assert_eq!(repo.get_all_heroes().await.unwrap().len(), 10);
        assert_eq!(repo.get_all_powers().await.unwrap().len(), 4);
    }
}
