//! One full catalog synchronization pass
//!
//! Stage order is a correctness requirement, not style: reference entities
//! first (card conversion needs their IDs), then the set scan, then the
//! outdated-set upsert, then the per-set card/SKU fan-out. Everything runs
//! inside a single transaction committed at the end, so a failure anywhere
//! leaves the local catalog untouched.

use rusqlite::Connection;

use crate::database;
use crate::error::Result;
use crate::models::{Card, CardSet, Condition, Printing, Rarity, ReferenceIndex, Sku};
use crate::paginate::{paginate, Pagination};
use crate::repository::CatalogRepository;
use crate::tcgplayer::records::CardRecord;

/// Counters reported by a completed pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub outdated_sets: usize,
    pub cards: usize,
    pub skus: usize,
}

pub struct SyncWorker {
    repository: CatalogRepository,
    bulk: Pagination,
}

impl SyncWorker {
    pub fn new(repository: CatalogRepository) -> Self {
        Self {
            repository,
            bulk: Pagination::default(),
        }
    }

    /// Override the bulk pagination parameters (tests shrink the window)
    pub fn with_pagination(mut self, bulk: Pagination) -> Self {
        self.bulk = bulk;
        self
    }

    /// Run one full synchronization pass against `conn`
    pub async fn run(&self, conn: &mut Connection) -> Result<SyncSummary> {
        log::info!("Catalog sync started");
        let tx = conn.transaction()?;

        let refs = self.refresh_reference_data(&tx).await?;

        let outdated = self.collect_outdated_sets(&tx).await?;
        log::info!(
            "{} sets are outdated: {:?}",
            outdated.len(),
            outdated.iter().map(|set| set.name.as_str()).collect::<Vec<_>>()
        );

        self.repository.insert_sets(&tx, &outdated)?;

        let (cards, skus) = self.refresh_cards_and_skus(&tx, &outdated, &refs).await?;

        tx.commit()?;

        let summary = SyncSummary {
            outdated_sets: outdated.len(),
            cards,
            skus,
        };
        log::info!(
            "Catalog sync done: {} sets refreshed, {} cards, {} skus",
            summary.outdated_sets,
            summary.cards,
            summary.skus
        );
        Ok(summary)
    }

    /// Fetch and upsert all printings, conditions and rarities.
    ///
    /// Must run before any card is converted: card and SKU rows carry
    /// foreign keys into these tables.
    async fn refresh_reference_data(&self, conn: &Connection) -> Result<ReferenceIndex> {
        let printing_records = self.repository.fetch_card_printings().await?;
        let condition_records = self.repository.fetch_card_conditions().await?;
        let rarity_records = self.repository.fetch_card_rarities().await?;

        let printings: Vec<Printing> = printing_records.iter().map(Printing::from_record).collect();
        let conditions: Vec<Condition> = condition_records
            .iter()
            .map(Condition::from_record)
            .collect();
        let rarities: Vec<Rarity> = rarity_records.iter().map(Rarity::from_record).collect();

        self.repository.insert_printings(conn, &printings)?;
        self.repository.insert_conditions(conn, &conditions)?;
        self.repository.insert_rarities(conn, &rarities)?;

        log::info!(
            "Reference data refreshed: {} printings, {} conditions, {} rarities",
            printings.len(),
            conditions.len(),
            rarities.len()
        );

        Ok(ReferenceIndex::new(&rarities))
    }

    /// Scan the full remote set collection and collect every set that is
    /// missing locally or has a strictly newer remote `modified_date`.
    /// Equal timestamps mean current, so a re-run does no redundant work.
    async fn collect_outdated_sets(&self, conn: &Connection) -> Result<Vec<CardSet>> {
        let total = self.repository.fetch_total_card_set_count().await?;
        let mut outdated = Vec::new();

        paginate(
            total,
            self.bulk,
            |offset, limit| self.repository.fetch_card_sets(offset, limit),
            |records| {
                for record in &records {
                    let candidate = CardSet::from_record(record)?;
                    let current = match database::get_set(conn, candidate.id)? {
                        Some(existing) => existing.modified_date >= candidate.modified_date,
                        None => false,
                    };
                    if !current {
                        outdated.push(candidate);
                    }
                }
                Ok(())
            },
        )
        .await?;

        Ok(outdated)
    }

    /// Fetch and persist cards and SKUs for every outdated set.
    ///
    /// The outdated-set list itself is paginated with window 1 and
    /// concurrency 1, so only one set's deep fetch is in flight at a time.
    async fn refresh_cards_and_skus(
        &self,
        conn: &Connection,
        outdated: &[CardSet],
        refs: &ReferenceIndex,
    ) -> Result<(usize, usize)> {
        let mut cards_total = 0;
        let mut skus_total = 0;

        paginate(
            outdated.len() as u64,
            Pagination::serial(),
            |offset, _limit| self.fetch_cards_in_set(outdated[offset as usize].id),
            |card_records| {
                let (cards, skus) = self.insert_cards_and_skus(conn, &card_records, refs)?;
                cards_total += cards;
                skus_total += skus;
                Ok(())
            },
        )
        .await?;

        Ok((cards_total, skus_total))
    }

    /// Gather every card record of one set through the paged products endpoint
    async fn fetch_cards_in_set(&self, set_id: i64) -> Result<Vec<CardRecord>> {
        let total = self.repository.fetch_total_card_count(set_id).await?;
        log::debug!("Set {}: fetching {} cards", set_id, total);

        let mut set_cards = Vec::new();
        paginate(
            total,
            self.bulk,
            |offset, limit| self.repository.fetch_cards(offset, limit, set_id),
            |records| {
                set_cards.extend(records);
                Ok(())
            },
        )
        .await?;

        Ok(set_cards)
    }

    /// Convert and insert one set's cards, then each card's nested SKUs
    fn insert_cards_and_skus(
        &self,
        conn: &Connection,
        card_records: &[CardRecord],
        refs: &ReferenceIndex,
    ) -> Result<(usize, usize)> {
        let cards: Vec<Card> = card_records
            .iter()
            .map(|record| Card::from_record(record, refs))
            .collect::<Result<_>>()?;
        let inserted_cards = self.repository.insert_cards(conn, &cards)?;

        let mut inserted_skus = 0;
        for record in card_records {
            let skus: Vec<Sku> = record.skus.iter().map(Sku::from_record).collect();
            inserted_skus += self.repository.insert_skus(conn, &skus)?;
        }

        Ok((inserted_cards, inserted_skus))
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
