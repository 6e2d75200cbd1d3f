//! Database operations for the catalog mirror
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Upserts are `ON CONFLICT DO UPDATE` rather than `INSERT OR REPLACE`:
//! with foreign keys enforced, a REPLACE on a parent row would delete it
//! under its children.

use rusqlite::{params, Connection};

use crate::models::{Card, CardSet, Condition, Printing, Rarity, Sku};

/// Result type for database operations
pub type DbResult<T> = rusqlite::Result<T>;

/// Initialize the database schema
///
/// Creates the reference tables (`printings`, `conditions`, `rarities`),
/// then `card_sets`, `cards` and `skus`, and enforces foreign keys on this
/// connection.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        -- Reference tables: fully re-fetched and upserted every sync pass
        CREATE TABLE IF NOT EXISTS printings (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS conditions (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            abbreviation TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rarities (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL
        );

        -- modified_date is the version marker for change detection
        CREATE TABLE IF NOT EXISTS card_sets (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            abbreviation TEXT,
            modified_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            set_id INTEGER NOT NULL REFERENCES card_sets(id),
            name TEXT NOT NULL,
            clean_name TEXT,
            rarity_id INTEGER NOT NULL REFERENCES rarities(id),
            image_url TEXT
        );

        CREATE TABLE IF NOT EXISTS skus (
            id INTEGER PRIMARY KEY,
            card_id INTEGER NOT NULL REFERENCES cards(id),
            printing_id INTEGER NOT NULL REFERENCES printings(id),
            condition_id INTEGER NOT NULL REFERENCES conditions(id),
            language_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_cards_set ON cards(set_id);
        CREATE INDEX IF NOT EXISTS idx_skus_card ON skus(card_id);
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

pub fn upsert_printings(conn: &Connection, printings: &[Printing]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO printings (id, name, display_order)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             display_order = excluded.display_order",
    )?;

    for printing in printings {
        stmt.execute(params![printing.id, &printing.name, printing.display_order])?;
    }
    Ok(printings.len())
}

pub fn upsert_conditions(conn: &Connection, conditions: &[Condition]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO conditions (id, name, abbreviation)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             abbreviation = excluded.abbreviation",
    )?;

    for condition in conditions {
        stmt.execute(params![condition.id, &condition.name, &condition.abbreviation])?;
    }
    Ok(conditions.len())
}

pub fn upsert_rarities(conn: &Connection, rarities: &[Rarity]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO rarities (id, name, code)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             code = excluded.code",
    )?;

    for rarity in rarities {
        stmt.execute(params![rarity.id, &rarity.name, &rarity.code])?;
    }
    Ok(rarities.len())
}

pub fn upsert_sets(conn: &Connection, sets: &[CardSet]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO card_sets (id, name, abbreviation, modified_date)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             abbreviation = excluded.abbreviation,
             modified_date = excluded.modified_date",
    )?;

    for set in sets {
        stmt.execute(params![set.id, &set.name, &set.abbreviation, set.modified_date])?;
    }
    Ok(sets.len())
}

pub fn upsert_cards(conn: &Connection, cards: &[Card]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cards (id, set_id, name, clean_name, rarity_id, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             set_id = excluded.set_id,
             name = excluded.name,
             clean_name = excluded.clean_name,
             rarity_id = excluded.rarity_id,
             image_url = excluded.image_url",
    )?;

    for card in cards {
        stmt.execute(params![
            card.id,
            card.set_id,
            &card.name,
            &card.clean_name,
            card.rarity_id,
            &card.image_url,
        ])?;
    }
    Ok(cards.len())
}

pub fn upsert_skus(conn: &Connection, skus: &[Sku]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO skus (id, card_id, printing_id, condition_id, language_id)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             card_id = excluded.card_id,
             printing_id = excluded.printing_id,
             condition_id = excluded.condition_id,
             language_id = excluded.language_id",
    )?;

    for sku in skus {
        stmt.execute(params![
            sku.id,
            sku.card_id,
            sku.printing_id,
            sku.condition_id,
            sku.language_id,
        ])?;
    }
    Ok(skus.len())
}

/// Look up the locally stored copy of a set
pub fn get_set(conn: &Connection, id: i64) -> DbResult<Option<CardSet>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, abbreviation, modified_date FROM card_sets WHERE id = ?1",
    )?;

    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(CardSet {
            id: row.get(0)?,
            name: row.get(1)?,
            abbreviation: row.get(2)?,
            modified_date: row.get(3)?,
        })),
        None => Ok(None),
    }
}

pub fn count_sets(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM card_sets", [], |row| row.get(0))
}

pub fn count_cards(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))
}

pub fn count_skus(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM skus", [], |row| row.get(0))
}

pub fn count_rarities(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM rarities", [], |row| row.get(0))
}
