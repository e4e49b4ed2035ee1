//! ドリンクレコード型
//!
//! 抽出ステップが返す候補ドリンクと、スコア付与後の最終形。

use crate::normalizer::Dimension;
use crate::preference::Preference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 抽出ステップが返す候補ドリンク
///
/// 上流が `field_scores` / `match_percentage` を付けてくることがあるが、
/// これらは検証パスで必ず再計算される（信用しない）。
#[derive(Debug, Clone, Default)]
pub struct CandidateDrink {
    pub name: String,
    pub price: Option<String>,
    pub alcohol_type: Option<String>,
    pub strength: Option<String>,
    pub glassware: Option<String>,
    pub acidity: Option<String>,
    pub sweetness: Option<String>,
    pub bitterness: Option<String>,
    pub spice: Option<String>,
    pub ingredients: Vec<String>,
    pub description: Option<String>,
    pub reasoning: Option<String>,
    pub assumptions: Option<String>,
    /// 上流が付与したフィールドスコア（生値、未検証）
    pub upstream_field_scores: Option<HashMap<String, serde_json::Value>>,
    /// 上流が付与したマッチ率（未検証、常に再計算で上書き）
    pub upstream_match_percentage: Option<f64>,
}

impl CandidateDrink {
    /// 次元ごとの属性値を取得
    pub fn attribute(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::AlcoholType => self.alcohol_type.as_deref(),
            Dimension::Strength => self.strength.as_deref(),
            Dimension::Glassware => self.glassware.as_deref(),
            Dimension::Acidity => self.acidity.as_deref(),
            Dimension::Sweetness => self.sweetness.as_deref(),
            Dimension::Bitterness => self.bitterness.as_deref(),
            Dimension::Spice => self.spice.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// 次元ごとの重み付きスコア（各値は [0, weight] の整数）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldScores {
    pub alcohol_type: i64,
    pub strength: i64,
    pub glassware: i64,
    pub acidity: i64,
    pub sweetness: i64,
    pub bitterness: i64,
    pub spice: i64,
}

impl FieldScores {
    pub fn get(&self, dimension: Dimension) -> i64 {
        match dimension {
            Dimension::AlcoholType => self.alcohol_type,
            Dimension::Strength => self.strength,
            Dimension::Glassware => self.glassware,
            Dimension::Acidity => self.acidity,
            Dimension::Sweetness => self.sweetness,
            Dimension::Bitterness => self.bitterness,
            Dimension::Spice => self.spice,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: i64) {
        match dimension {
            Dimension::AlcoholType => self.alcohol_type = score,
            Dimension::Strength => self.strength = score,
            Dimension::Glassware => self.glassware = score,
            Dimension::Acidity => self.acidity = score,
            Dimension::Sweetness => self.sweetness = score,
            Dimension::Bitterness => self.bitterness = score,
            Dimension::Spice => self.spice = score,
        }
    }

    /// 全次元の合計（重み付き済みなのでそのまま百分率の分子になる）
    pub fn total(&self) -> i64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }
}

/// スコア付与済みドリンク（レスポンスに載る最終形）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDrink {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub glassware: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acidity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitterness: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub field_scores: FieldScores,

    /// フィールドスコアの重み付き合計（小数1桁）。集約器のみが算出する。
    pub match_percentage: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<String>,

    /// 抽出元画像の番号（1始まり）
    pub source_image: usize,
}

/// 処理件数の内訳
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub images_processed: usize,
    pub total_drinks_found: usize,
    pub unique_drinks: usize,
    pub drinks_shown: usize,
}

/// 1リクエスト分の最終結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub status: String,
    pub preference: Preference,
    pub drinks: Vec<ScoredDrink>,
    pub sorted_by: String,
    pub notes: String,
    pub diagnostics: Diagnostics,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_blank_treated_as_missing() {
        let drink = CandidateDrink {
            name: "Negroni".into(),
            alcohol_type: Some("Gin".into()),
            strength: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(drink.attribute(Dimension::AlcoholType), Some("Gin"));
        assert_eq!(drink.attribute(Dimension::Strength), None);
        assert_eq!(drink.attribute(Dimension::Glassware), None);
    }

    #[test]
    fn test_field_scores_total() {
        let mut scores = FieldScores::default();
        scores.set(Dimension::AlcoholType, 40);
        scores.set(Dimension::Strength, 20);
        scores.set(Dimension::Spice, 4);
        assert_eq!(scores.total(), 64);
    }

    #[test]
    fn test_scored_drink_serializes_wire_fields() {
        let drink = ScoredDrink {
            name: "Old Fashioned".into(),
            price: Some("$14".into()),
            alcohol_type: Some("Whiskey".into()),
            strength: None,
            glassware: None,
            acidity: None,
            sweetness: None,
            bitterness: None,
            spice: None,
            ingredients: vec!["bourbon".into(), "bitters".into()],
            description: None,
            field_scores: FieldScores {
                alcohol_type: 40,
                ..Default::default()
            },
            match_percentage: 40.0,
            reasoning: None,
            assumptions: None,
            source_image: 2,
        };

        let json = serde_json::to_value(&drink).unwrap();
        assert_eq!(json["name"], "Old Fashioned");
        assert_eq!(json["match_percentage"], 40.0);
        assert_eq!(json["field_scores"]["alcohol_type"], 40);
        assert_eq!(json["source_image"], 2);
        // 未設定の属性はレスポンスに含めない
        assert!(json.get("strength").is_none());
    }
}
