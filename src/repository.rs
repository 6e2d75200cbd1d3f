//! Catalog repository: the seam between the sync engine and its collaborators
//!
//! Translates domain sync operations into concrete API calls and batched
//! persistence calls. Holds no decision logic; comparison and ordering live
//! in the sync worker.

use rusqlite::Connection;

use crate::database;
use crate::error::Result;
use crate::models::{Card, CardSet, Condition, Printing, Rarity, Sku};
use crate::tcgplayer::records::{
    CardRecord, ConditionRecord, PrintingRecord, RarityRecord, SetRecord,
};
use crate::tcgplayer::TcgPlayerClient;

pub struct CatalogRepository {
    client: TcgPlayerClient,
}

impl CatalogRepository {
    pub fn new(client: TcgPlayerClient) -> Self {
        Self { client }
    }

    // ── Remote fetches ─────────────────────────────────────────────────

    pub async fn fetch_card_printings(&self) -> Result<Vec<PrintingRecord>> {
        self.client.fetch_card_printings().await
    }

    pub async fn fetch_card_conditions(&self) -> Result<Vec<ConditionRecord>> {
        self.client.fetch_card_conditions().await
    }

    pub async fn fetch_card_rarities(&self) -> Result<Vec<RarityRecord>> {
        self.client.fetch_card_rarities().await
    }

    pub async fn fetch_card_sets(&self, offset: u64, limit: u64) -> Result<Vec<SetRecord>> {
        self.client.fetch_card_sets(offset, limit).await
    }

    pub async fn fetch_total_card_set_count(&self) -> Result<u64> {
        self.client.fetch_total_card_set_count().await
    }

    pub async fn fetch_cards(
        &self,
        offset: u64,
        limit: u64,
        set_id: i64,
    ) -> Result<Vec<CardRecord>> {
        self.client.fetch_cards(offset, limit, set_id).await
    }

    pub async fn fetch_total_card_count(&self, set_id: i64) -> Result<u64> {
        self.client.fetch_total_card_count(set_id).await
    }

    // ── Batched persistence ────────────────────────────────────────────

    pub fn insert_printings(&self, conn: &Connection, printings: &[Printing]) -> Result<usize> {
        Ok(database::upsert_printings(conn, printings)?)
    }

    pub fn insert_conditions(&self, conn: &Connection, conditions: &[Condition]) -> Result<usize> {
        Ok(database::upsert_conditions(conn, conditions)?)
    }

    pub fn insert_rarities(&self, conn: &Connection, rarities: &[Rarity]) -> Result<usize> {
        Ok(database::upsert_rarities(conn, rarities)?)
    }

    pub fn insert_sets(&self, conn: &Connection, sets: &[CardSet]) -> Result<usize> {
        Ok(database::upsert_sets(conn, sets)?)
    }

    pub fn insert_cards(&self, conn: &Connection, cards: &[Card]) -> Result<usize> {
        Ok(database::upsert_cards(conn, cards)?)
    }

    pub fn insert_skus(&self, conn: &Connection, skus: &[Sku]) -> Result<usize> {
        Ok(database::upsert_skus(conn, skus)?)
    }
}
