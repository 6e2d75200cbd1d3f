//! Wire records returned by the TCGplayer catalog API

use serde::Deserialize;

/// Printing record from `/catalog/categories/{id}/printings`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrintingRecord {
    pub printing_id: i64,
    pub name: String,
    #[serde(default)]
    pub display_order: i64,
}

/// Condition record from `/catalog/categories/{id}/conditions`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub condition_id: i64,
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub display_order: i64,
}

/// Rarity record from `/catalog/categories/{id}/rarities`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RarityRecord {
    pub rarity_id: i64,
    pub display_text: String,
    pub db_value: String,
}

/// Set (group) record from `/catalog/categories/{id}/groups`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    pub modified_on: String,
}

/// Name/value entry in a card record's extended data (carries the rarity)
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDataRecord {
    pub name: String,
    pub value: String,
}

/// Card (product) record from `/catalog/products`, with nested SKUs
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub product_id: i64,
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub clean_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub extended_data: Vec<ExtendedDataRecord>,
    #[serde(default)]
    pub skus: Vec<SkuRecord>,
}

/// SKU record nested inside a card record
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    pub sku_id: i64,
    pub product_id: i64,
    pub language_id: i64,
    pub printing_id: i64,
    pub condition_id: i64,
}
