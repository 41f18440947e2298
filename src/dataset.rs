// ============================================
// src/dataset.rs
// 漢字データセットの読み込みと検証
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::kanji::{ANY_BUSHU_SIGN, KANJI_LIST, KanjiEntry, RadicalIndex};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not a JSON array of kanji/bushu objects")]
    Parse(#[from] serde_json::Error),
    #[error("dataset contains no kanji")]
    Empty,
    #[error("entry {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
    #[error("entry {index} ({kanji}) uses the reserved radical label \"-\"")]
    ReservedLabel { index: usize, kanji: String },
}

/// 検証済みの漢字リスト
#[derive(Debug, Clone)]
pub struct Dataset {
    entries: Vec<KanjiEntry>,
}

impl Dataset {
    pub fn new(entries: Vec<KanjiEntry>) -> Result<Self, DatasetError> {
        if entries.is_empty() {
            return Err(DatasetError::Empty);
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.kanji.is_empty() {
                return Err(DatasetError::EmptyField { index, field: "kanji" });
            }
            if entry.bushu.is_empty() {
                return Err(DatasetError::EmptyField { index, field: "bushu" });
            }
            if entry.bushu == ANY_BUSHU_SIGN {
                return Err(DatasetError::ReservedLabel {
                    index,
                    kanji: entry.kanji.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// 組み込みの漢字リスト
    pub fn builtin() -> Self {
        Self {
            entries: KANJI_LIST
                .iter()
                .map(|(kanji, bushu)| KanjiEntry::new(*kanji, *bushu))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let entries: Vec<KanjiEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// MARK:JSONファイルから読み込む
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let json = fs::read_to_string(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[KanjiEntry] {
        &self.entries
    }

    pub fn index(&self) -> RadicalIndex {
        RadicalIndex::build(&self.entries)
    }
}
