//! Catalog domain entities and their conversions from wire records
//!
//! Entities keep the remote catalog's numeric IDs as their primary keys;
//! there is no separate local ID space. Conversions are pure mappings;
//! the only lookup context is the [`ReferenceIndex`] built from the
//! freshly synced rarities, passed in explicitly.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::{Result, SyncError};
use crate::tcgplayer::records::{
    CardRecord, ConditionRecord, PrintingRecord, RarityRecord, SetRecord, SkuRecord,
};

/// Timestamp format used by the catalog API (e.g. `2021-03-20T16:41:43.807`)
const MODIFIED_ON_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn parse_modified_on(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, MODIFIED_ON_FORMAT)
        .map_err(|e| SyncError::InvalidRecord(format!("bad modifiedOn '{}': {}", raw, e)))
}

/// Printing reference entity (Normal, Holofoil, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Printing {
    pub id: i64,
    pub name: String,
    pub display_order: i64,
}

impl Printing {
    pub fn from_record(record: &PrintingRecord) -> Self {
        Self {
            id: record.printing_id,
            name: record.name.clone(),
            display_order: record.display_order,
        }
    }
}

/// Condition reference entity (Near Mint, Lightly Played, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
}

impl Condition {
    pub fn from_record(record: &ConditionRecord) -> Self {
        Self {
            id: record.condition_id,
            name: record.name.clone(),
            abbreviation: record.abbreviation.clone(),
        }
    }
}

/// Rarity reference entity
#[derive(Debug, Clone, PartialEq)]
pub struct Rarity {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl Rarity {
    pub fn from_record(record: &RarityRecord) -> Self {
        Self {
            id: record.rarity_id,
            name: record.display_text.clone(),
            code: record.db_value.clone(),
        }
    }
}

/// Card set; `modified_date` is the version marker driving change detection
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub id: i64,
    pub name: String,
    pub abbreviation: Option<String>,
    pub modified_date: NaiveDateTime,
}

impl CardSet {
    pub fn from_record(record: &SetRecord) -> Result<Self> {
        Ok(Self {
            id: record.group_id,
            name: record.name.clone(),
            abbreviation: record.abbreviation.clone(),
            modified_date: parse_modified_on(&record.modified_on)?,
        })
    }
}

/// Card; belongs to exactly one [`CardSet`]
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub set_id: i64,
    pub name: String,
    pub clean_name: Option<String>,
    pub rarity_id: i64,
    pub image_url: Option<String>,
}

impl Card {
    /// Card records carry their rarity as extended-data text; `refs`
    /// resolves it to the rarity ID synced earlier in the same pass.
    pub fn from_record(record: &CardRecord, refs: &ReferenceIndex) -> Result<Self> {
        let rarity_text = record
            .extended_data
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case("rarity"))
            .map(|entry| entry.value.as_str())
            .ok_or_else(|| {
                SyncError::InvalidRecord(format!("card {} has no rarity", record.product_id))
            })?;

        let rarity_id = refs.rarity_id(rarity_text).ok_or_else(|| {
            SyncError::InvalidRecord(format!(
                "card {}: unknown rarity '{}'",
                record.product_id, rarity_text
            ))
        })?;

        Ok(Self {
            id: record.product_id,
            set_id: record.group_id,
            name: record.name.clone(),
            clean_name: record.clean_name.clone(),
            rarity_id,
            image_url: record.image_url.clone(),
        })
    }
}

/// SKU; leaf entity under a [`Card`]
#[derive(Debug, Clone, PartialEq)]
pub struct Sku {
    pub id: i64,
    pub card_id: i64,
    pub printing_id: i64,
    pub condition_id: i64,
    pub language_id: i64,
}

impl Sku {
    pub fn from_record(record: &SkuRecord) -> Self {
        Self {
            id: record.sku_id,
            card_id: record.product_id,
            printing_id: record.printing_id,
            condition_id: record.condition_id,
            language_id: record.language_id,
        }
    }
}

/// Rarity lookup for card conversion, keyed by display text and code.
/// Case-insensitive: card extended data is not consistent about either.
pub struct ReferenceIndex {
    rarity_ids: HashMap<String, i64>,
}

impl ReferenceIndex {
    pub fn new(rarities: &[Rarity]) -> Self {
        let mut rarity_ids = HashMap::new();
        for rarity in rarities {
            rarity_ids.insert(rarity.name.to_ascii_lowercase(), rarity.id);
            rarity_ids.insert(rarity.code.to_ascii_lowercase(), rarity.id);
        }
        Self { rarity_ids }
    }

    pub fn rarity_id(&self, text: &str) -> Option<i64> {
        self.rarity_ids.get(&text.to_ascii_lowercase()).copied()
    }
}
