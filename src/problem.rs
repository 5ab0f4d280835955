use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Catalog, DEFAULT_SLOTS, ForbiddenRelation, Item, Slot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenPair {
    #[serde(deserialize_with = "id_text")]
    pub item: String,
    pub slot: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    #[serde(default)]
    pub slots: Option<u32>,
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub forbidden: Vec<ForbiddenPair>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Items(Vec<ItemRecord>),
    Problem(ProblemFile),
}

#[derive(Debug, Clone)]
pub struct Problem {
    pub catalog: Catalog<String, ItemRecord>,
    pub forbidden: ForbiddenRelation<String>,
    pub slots: u32,
}

impl ProblemFile {
    pub fn into_problem(self, slots: Option<u32>) -> Result<Problem> {
        let slots = slots.or(self.slots).unwrap_or(DEFAULT_SLOTS);
        if slots == 0 {
            bail!("slot count must be at least 1");
        }
        let catalog = Catalog::new(
            self.items
                .into_iter()
                .map(|rec| Item::new(rec.id.clone(), rec)),
        )?;
        let mut forbidden = ForbiddenRelation::new();
        for pair in self.forbidden {
            if !Slot::new(pair.slot).is_valid_for(slots) {
                bail!(
                    "forbidden pair ({}, {}) names a slot outside 1..={}",
                    pair.item,
                    pair.slot,
                    slots
                );
            }
            forbidden.forbid(pair.item, Slot::new(pair.slot));
        }
        Ok(Problem {
            catalog,
            forbidden,
            slots,
        })
    }
}

pub fn parse_problem_str(text: &str) -> Result<ProblemFile> {
    let parsed = serde_json::from_str(text).context("problem file is not valid JSON")?;
    Ok(parsed)
}

pub fn load_problem(path: &Path) -> Result<ProblemFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_problem_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_items_str(text: &str) -> Result<Vec<ItemRecord>> {
    let parsed: CatalogFile =
        serde_json::from_str(text).context("expected an item array or a problem object")?;
    Ok(match parsed {
        CatalogFile::Items(items) => items,
        CatalogFile::Problem(p) => p.items,
    })
}

pub fn load_items(path: &Path) -> Result<Vec<ItemRecord>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_items_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn id_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(u64),
        Text(String),
    }
    Ok(match RawId::deserialize(de)? {
        RawId::Num(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
