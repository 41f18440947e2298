/*
 * src/kanji.rs
 * 漢字データと部首インデックス
 */

use std::collections::HashMap;

use serde::Deserialize;

/// 「すべての部首」を表すラベル
pub const ANY_BUSHU_SIGN: &str = "-";

/// 漢字1文字とその部首
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KanjiEntry {
    pub kanji: String,
    pub bushu: String,
}

impl KanjiEntry {
    pub fn new(kanji: impl Into<String>, bushu: impl Into<String>) -> Self {
        Self {
            kanji: kanji.into(),
            bushu: bushu.into(),
        }
    }
}

/// 組み込みの漢字リスト (漢字, 部首)
#[rustfmt::skip]
pub const KANJI_LIST: &[(&str, &str)] = &[
    // 木
    ("木", "木"), ("林", "木"), ("森", "木"), ("村", "木"), ("本", "木"), ("机", "木"),
    ("札", "木"), ("材", "木"), ("松", "木"), ("枝", "木"), ("柱", "木"), ("桜", "木"),
    ("校", "木"), ("根", "木"), ("植", "木"), ("橋", "木"), ("板", "木"), ("横", "木"),
    ("楽", "木"), ("東", "木"),
    // 氵
    ("海", "氵"), ("池", "氵"), ("泳", "氵"), ("波", "氵"), ("洋", "氵"), ("湖", "氵"),
    ("港", "氵"), ("温", "氵"), ("消", "氵"), ("漢", "氵"), ("油", "氵"), ("浅", "氵"),
    ("深", "氵"), ("流", "氵"), ("決", "氵"), ("注", "氵"),
    // 亻
    ("休", "亻"), ("体", "亻"), ("作", "亻"), ("何", "亻"), ("住", "亻"), ("使", "亻"),
    ("仕", "亻"), ("係", "亻"), ("付", "亻"), ("代", "亻"), ("信", "亻"),
    ("便", "亻"), ("億", "亻"),
    // 口
    ("口", "口"), ("右", "口"), ("古", "口"), ("号", "口"), ("名", "口"), ("味", "口"),
    ("品", "口"), ("和", "口"), ("命", "口"), ("員", "口"), ("商", "口"), ("器", "口"),
    ("唱", "口"),
    // 日
    ("日", "日"), ("明", "日"), ("時", "日"), ("晴", "日"), ("昼", "日"), ("曜", "日"),
    ("早", "日"), ("春", "日"), ("昨", "日"), ("暗", "日"), ("暑", "日"), ("星", "日"),
    ("昔", "日"),
    // 辶
    ("近", "辶"), ("遠", "辶"), ("道", "辶"), ("通", "辶"), ("週", "辶"), ("進", "辶"),
    ("送", "辶"), ("返", "辶"), ("速", "辶"), ("運", "辶"), ("遊", "辶"), ("達", "辶"),
    ("選", "辶"),
    // 言
    ("言", "言"), ("話", "言"), ("語", "言"), ("読", "言"), ("記", "言"), ("計", "言"),
    ("詩", "言"), ("調", "言"), ("談", "言"), ("議", "言"), ("説", "言"), ("試", "言"),
    ("課", "言"),
    // 糸
    ("紙", "糸"), ("線", "糸"), ("組", "糸"), ("細", "糸"), ("絵", "糸"), ("終", "糸"),
    ("級", "糸"), ("練", "糸"), ("結", "糸"), ("続", "糸"), ("緑", "糸"), ("給", "糸"),
    // 艹
    ("花", "艹"), ("茶", "艹"), ("草", "艹"), ("葉", "艹"), ("若", "艹"), ("苦", "艹"),
    ("落", "艹"), ("薬", "艹"), ("英", "艹"), ("芽", "艹"), ("菜", "艹"),
    // 心
    ("心", "心"), ("思", "心"), ("悪", "心"), ("意", "心"), ("感", "心"), ("想", "心"),
    ("息", "心"), ("急", "心"), ("悲", "心"), ("必", "心"), ("念", "心"),
    // 宀
    ("家", "宀"), ("室", "宀"), ("安", "宀"), ("守", "宀"), ("定", "宀"), ("実", "宀"),
    ("客", "宀"), ("宿", "宀"), ("寒", "宀"), ("宮", "宀"), ("宝", "宀"),
    // 竹
    ("竹", "竹"), ("答", "竹"), ("算", "竹"), ("筆", "竹"), ("第", "竹"), ("等", "竹"),
    ("箱", "竹"), ("笛", "竹"), ("節", "竹"),
    // 扌
    ("打", "扌"), ("投", "扌"), ("持", "扌"), ("指", "扌"), ("拾", "扌"), ("折", "扌"),
    ("技", "扌"), ("招", "扌"),
    // 雨
    ("雨", "雨"), ("雪", "雨"), ("雲", "雨"), ("電", "雨"), ("震", "雨"),
    // 金
    ("金", "金"), ("鉄", "金"), ("銀", "金"), ("鏡", "金"), ("銅", "金"), ("針", "金"),
];

/// 部首ごとの漢字のまとまり
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radical {
    pub label: String,
    pub kanji: Vec<String>,
}

/// {"部首": [該当する漢字の配列]} を、該当する漢字の多い順に並べたもの
#[derive(Debug, Clone)]
pub struct RadicalIndex {
    radicals: Vec<Radical>,
    positions: HashMap<String, usize>,
}

impl RadicalIndex {
    /// 検証済みの漢字リストからインデックスを作る
    ///
    /// 部首ラベルは `ANY_BUSHU_SIGN` を含まないこと (`Dataset` が保証する)。
    pub fn build(entries: &[KanjiEntry]) -> Self {
        // "-" にはすべての漢字を与える
        let mut radicals = vec![Radical {
            label: ANY_BUSHU_SIGN.to_string(),
            kanji: entries.iter().map(|e| e.kanji.clone()).collect(),
        }];
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for entry in entries {
            match seen.get(entry.bushu.as_str()) {
                Some(&i) => radicals[i].kanji.push(entry.kanji.clone()),
                None => {
                    seen.insert(&entry.bushu, radicals.len());
                    radicals.push(Radical {
                        label: entry.bushu.clone(),
                        kanji: vec![entry.kanji.clone()],
                    });
                }
            }
        }

        // 安定ソートなので、同数の部首は出現順のまま
        radicals.sort_by(|a, b| b.kanji.len().cmp(&a.kanji.len()));

        let positions = radicals
            .iter()
            .enumerate()
            .map(|(i, r)| (r.label.clone(), i))
            .collect();

        Self { radicals, positions }
    }

    /// 部首に該当する漢字の配列
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.position(label).map(|i| self.radicals[i].kanji.as_slice())
    }

    /// 並び順での位置
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn radical_at(&self, position: usize) -> Option<&Radical> {
        self.radicals.get(position)
    }

    /// 該当する漢字の多い順の部首一覧
    pub fn radicals(&self) -> &[Radical] {
        &self.radicals
    }

    pub fn len(&self) -> usize {
        self.radicals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<KanjiEntry> {
        pairs.iter().map(|(k, b)| KanjiEntry::new(*k, *b)).collect()
    }

    #[test]
    fn sentinel_holds_every_kanji_in_source_order() {
        let index = RadicalIndex::build(&entries(&[("木", "木"), ("林", "木"), ("花", "艹")]));
        assert_eq!(index.get(ANY_BUSHU_SIGN).unwrap(), ["木", "林", "花"]);
        assert_eq!(index.get("木").unwrap(), ["木", "林"]);
        assert_eq!(index.get("艹").unwrap(), ["花"]);
        assert!(index.get("金").is_none());
    }

    #[test]
    fn radicals_sorted_by_count_then_encounter_order() {
        let index = RadicalIndex::build(&entries(&[
            ("花", "艹"),
            ("海", "氵"),
            ("木", "木"),
            ("池", "氵"),
            ("草", "艹"),
            ("雨", "雨"),
        ]));
        let labels: Vec<&str> = index.radicals().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["-", "艹", "氵", "木", "雨"]);
        assert_eq!(index.position("氵"), Some(2));
        assert_eq!(index.radical_at(4).unwrap().label, "雨");
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn every_kanji_appears_under_its_radical_and_sentinel() {
        let list: Vec<KanjiEntry> = KANJI_LIST
            .iter()
            .map(|(k, b)| KanjiEntry::new(*k, *b))
            .collect();
        let index = RadicalIndex::build(&list);
        for entry in &list {
            assert!(index.get(&entry.bushu).unwrap().contains(&entry.kanji));
            assert!(index.get(ANY_BUSHU_SIGN).unwrap().contains(&entry.kanji));
        }
        assert_eq!(index.get(ANY_BUSHU_SIGN).unwrap().len(), KANJI_LIST.len());
        assert_eq!(index.radicals()[0].label, ANY_BUSHU_SIGN);
    }
}
