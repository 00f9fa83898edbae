//! Item catalog: records, JSON parsing and the repetition generator
//!
//! The catalog file uses the layout the inventory tooling has always written:
//!
//! ```json
//! { "ItemDatas": [ { "IconIndex": 0, "Name": "Sword", "Description": "...", "Stat": 12 } ] }
//! ```
//!
//! A bare top-level array of the same objects is accepted too.
//!
//! The working set shown in the list is produced by [`generate`], which
//! repeats the parsed source `scale` times.

pub mod icons;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// Catalog bundled with the binary, used when no catalog path is configured
const BUNDLED_CATALOG: &str = include_str!("../../assets/items.json");

/// A single inventory entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemRecord {
    /// Index into the icon table
    pub icon_index: i32,
    pub name: String,
    pub description: String,
    pub stat: i32,
}

/// Errors raised while building a catalog
#[derive(Debug)]
pub enum CatalogError {
    /// Raw catalog text could not be parsed
    Parse(String),
    /// Source sequence has no records to repeat
    EmptySource,
    /// Repetition scale below 1
    InvalidScale(u32),
    /// Working set would exceed [`MAX_ROWS`]
    TooManyRows { records: usize, scale: u32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Catalog parse error: {}", msg),
            Self::EmptySource => write!(f, "Catalog source is empty"),
            Self::InvalidScale(scale) => {
                write!(f, "Catalog scale must be at least 1 (got {})", scale)
            }
            Self::TooManyRows { records, scale } => write!(
                f,
                "{} records x {} exceeds the {} row limit",
                records, scale, MAX_ROWS
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Accepted top-level shapes of a catalog document
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped {
        #[serde(rename = "ItemDatas")]
        item_datas: Vec<ItemRecord>,
    },
    Bare(Vec<ItemRecord>),
}

/// Parse raw catalog text into records (in file order)
pub fn parse(raw: &str) -> Result<Vec<ItemRecord>, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

    Ok(match document {
        CatalogDocument::Wrapped { item_datas } => item_datas,
        CatalogDocument::Bare(records) => records,
    })
}

/// Load and parse the catalog at `path`, or the bundled catalog when `None`
pub fn load(path: Option<&Path>) -> anyhow::Result<Vec<ItemRecord>> {
    use anyhow::Context;

    let records = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            parse(&raw).with_context(|| format!("Invalid catalog {}", path.display()))?
        }
        None => parse(BUNDLED_CATALOG).context("Invalid bundled catalog")?,
    };

    tracing::debug!("Loaded {} catalog records", records.len());
    Ok(records)
}

/// Largest working set `generate` will build. Row positions are `f32`
/// lines and stay exact below 2^24 even at the tallest row height.
pub const MAX_ROWS: usize = 1 << 20;

/// Expand `source` into the working set by repeating it `scale` times.
///
/// For a source of length `L`, the element at output index `i + j * L`
/// is `source[i]` for every `0 <= i < L` and `0 <= j < scale`. Records are
/// shared, not cloned: every repetition points at the same `Rc`.
pub fn generate(source: &[ItemRecord], scale: u32) -> Result<Vec<Rc<ItemRecord>>, CatalogError> {
    if source.is_empty() {
        return Err(CatalogError::EmptySource);
    }
    if scale < 1 {
        return Err(CatalogError::InvalidScale(scale));
    }
    let len = source.len();
    let total = len
        .checked_mul(scale as usize)
        .filter(|&total| total <= MAX_ROWS)
        .ok_or(CatalogError::TooManyRows {
            records: len,
            scale,
        })?;

    let shared: Vec<Rc<ItemRecord>> = source.iter().cloned().map(Rc::new).collect();
    let scale = scale as usize;

    let mut slots: Vec<Option<Rc<ItemRecord>>> = vec![None; total];
    for (i, record) in shared.iter().enumerate() {
        for j in 0..scale {
            slots[i + j * len] = Some(Rc::clone(record));
        }
    }

    // Every slot is written exactly once by the loops above
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(name: &str, stat: i32) -> ItemRecord {
        ItemRecord {
            icon_index: 0,
            name: name.to_string(),
            description: format!("{} description", name),
            stat,
        }
    }

    #[test]
    fn parse_wrapped_document() {
        let raw = r#"{"ItemDatas":[
            {"IconIndex":2,"Name":"Sword","Description":"Sharp","Stat":12},
            {"IconIndex":0,"Name":"Shield","Description":"Sturdy","Stat":7}
        ]}"#;

        let records = parse(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].icon_index, 2);
        assert_eq!(records[0].name, "Sword");
        assert_eq!(records[1].description, "Sturdy");
        assert_eq!(records[1].stat, 7);
    }

    #[test]
    fn parse_bare_array() {
        let raw = r#"[{"IconIndex":1,"Name":"Potion","Description":"Heals","Stat":30}]"#;
        let records = parse(raw).unwrap();
        assert_eq!(records, vec![ItemRecord {
            icon_index: 1,
            name: "Potion".to_string(),
            description: "Heals".to_string(),
            stat: 30,
        }]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse("not json"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse(r#"{"Items":[]}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn bundled_catalog_parses() {
        let records = load(None).unwrap();
        assert!(!records.is_empty());
    }

    #[test]
    fn generate_length_is_source_times_scale() {
        let source = vec![record("a", 1), record("b", 2), record("c", 3)];
        for scale in 1..=7 {
            assert_eq!(generate(&source, scale).unwrap().len(), 3 * scale as usize);
        }
    }

    #[test]
    fn generate_places_source_i_at_stride_positions() {
        let source: Vec<_> = (0..5).map(|n| record(&format!("r{}", n), n)).collect();
        let scale = 4;
        let out = generate(&source, scale).unwrap();
        let len = source.len();

        for i in 0..len {
            for j in 0..scale as usize {
                assert_eq!(*out[i + j * len], source[i], "mismatch at i={} j={}", i, j);
            }
        }
    }

    #[test]
    fn generate_three_by_two_order() {
        let source = vec![record("r0", 0), record("r1", 1), record("r2", 2)];
        let names: Vec<_> = generate(&source, 2)
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, vec!["r0", "r1", "r2", "r0", "r1", "r2"]);
    }

    #[test]
    fn generate_shares_records_between_repetitions() {
        let source = vec![record("a", 1), record("b", 2)];
        let out = generate(&source, 3).unwrap();
        assert!(Rc::ptr_eq(&out[0], &out[2]));
        assert!(Rc::ptr_eq(&out[1], &out[5]));
        assert!(!Rc::ptr_eq(&out[0], &out[1]));
    }

    #[test]
    fn generate_rejects_empty_source_and_zero_scale() {
        assert!(matches!(generate(&[], 3), Err(CatalogError::EmptySource)));
        assert!(matches!(
            generate(&[record("a", 1)], 0),
            Err(CatalogError::InvalidScale(0))
        ));
    }

    #[test]
    fn generate_rejects_oversized_working_sets() {
        let source = vec![record("a", 1), record("b", 2)];
        let over = (MAX_ROWS / 2 + 1) as u32;
        let err = generate(&source, over).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TooManyRows { records: 2, scale } if scale == over
        ));
        assert!(err.to_string().contains("row limit"));

        assert!(matches!(
            generate(&source, u32::MAX),
            Err(CatalogError::TooManyRows { .. })
        ));
    }
}
