//! フィールドスコアラーと集約器
//!
//! 好みプロファイルとドリンク属性を次元ごとに照合し、
//! 重み付きスコアの合計をマッチ率（0〜100）として算出する。
//!
//! ## スコア規則（正規化後に適用）
//! 1. 好みが「指定なし」→ 満点
//! 2. カノニカル値が一致 → 満点
//! 3. 隣接クラス → 半分（四捨五入）
//! 4. それ以外は 0。ただし属性欠落時は材料から保守的に推定し、
//!    クラス一致なら半分 + 推定メモを残す

pub mod inference;

use crate::drink::{CandidateDrink, FieldScores};
use crate::error::{MenuAiError, Result};
use crate::normalizer::{self, Dimension};
use crate::preference::Preference;
use serde_json::Value;
use std::collections::HashMap;

/// 次元ごとの重み表。合計は必ず100。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    pub alcohol_type: u32,
    pub strength: u32,
    pub glassware: u32,
    pub acidity: u32,
    pub sweetness: u32,
    pub bitterness: u32,
    pub spice: u32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            alcohol_type: 40,
            strength: 20,
            glassware: 10,
            acidity: 10,
            sweetness: 8,
            bitterness: 8,
            spice: 4,
        }
    }
}

impl WeightTable {
    pub fn weight(&self, dimension: Dimension) -> u32 {
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

    pub fn total(&self) -> u32 {
        Dimension::ALL.iter().map(|d| self.weight(*d)).sum()
    }

    /// 重み表の整合性チェック。パイプライン構築時に呼ぶ（リクエスト時ではなく）。
    pub fn validate(&self) -> Result<()> {
        let total = self.total();
        if total != 100 {
            return Err(MenuAiError::Config(format!(
                "重み表の合計が100ではありません: {}",
                total
            )));
        }
        Ok(())
    }
}

/// 1次元分のスコアリング結果
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    /// [0, weight] の整数スコア
    pub score: i64,
    /// 推定を使った場合のメモ
    pub assumption: Option<String>,
}

impl FieldOutcome {
    fn full(weight: u32) -> Self {
        Self {
            score: weight as i64,
            assumption: None,
        }
    }

    fn half(weight: u32) -> Self {
        Self {
            score: half_weight(weight),
            assumption: None,
        }
    }

    fn zero() -> Self {
        Self {
            score: 0,
            assumption: None,
        }
    }
}

/// 重みの半分（四捨五入）
fn half_weight(weight: u32) -> i64 {
    ((weight + 1) / 2) as i64
}

/// 1次元分のスコアを計算する
///
/// # Arguments
/// * `dimension` - 対象次元
/// * `preference_raw` - 好みの生値（None = 指定なし）
/// * `drink` - 対象ドリンク（属性欠落時の材料推定に使う）
/// * `weight` - この次元の重み
pub fn score_field(
    dimension: Dimension,
    preference_raw: Option<&str>,
    drink: &CandidateDrink,
    weight: u32,
) -> FieldOutcome {
    let preference = normalizer::normalize(dimension, preference_raw.unwrap_or(""));

    // 指定なしは無条件で満点
    if normalizer::is_dont_care(&preference) {
        return FieldOutcome::full(weight);
    }

    let drink_value = drink
        .attribute(dimension)
        .map(|raw| normalizer::normalize(dimension, raw))
        .filter(|canonical| !normalizer::is_dont_care(canonical));

    match drink_value {
        Some(canonical) => {
            if canonical == preference {
                FieldOutcome::full(weight)
            } else if normalizer::is_adjacent(dimension, &canonical, &preference) {
                FieldOutcome::half(weight)
            } else {
                FieldOutcome::zero()
            }
        }
        // 属性欠落: 材料から保守的に推定。クラス一致でも半分まで。
        None => match inference::infer_attribute(dimension, &drink.ingredients) {
            Some((inferred, evidence)) => {
                let class_match = inferred == preference
                    || normalizer::is_adjacent(dimension, &inferred, &preference);
                if class_match {
                    FieldOutcome {
                        score: half_weight(weight),
                        assumption: Some(format!(
                            "{}: 材料「{}」から {} と推定",
                            dimension, evidence, inferred
                        )),
                    }
                } else {
                    FieldOutcome::zero()
                }
            }
            None => FieldOutcome::zero(),
        },
    }
}

/// 全次元をスコアリングする
///
/// # Returns
/// フィールドスコアと、推定を使った場合のメモ（" / " 連結）
pub fn score_drink(
    preference: &Preference,
    drink: &CandidateDrink,
    weights: &WeightTable,
) -> (FieldScores, Option<String>) {
    let mut scores = FieldScores::default();
    let mut assumptions = Vec::new();

    for dimension in Dimension::ALL {
        let outcome = score_field(
            dimension,
            preference.get(dimension),
            drink,
            weights.weight(dimension),
        );
        scores.set(dimension, outcome.score);
        if let Some(note) = outcome.assumption {
            assumptions.push(note);
        }
    }

    let joined = if assumptions.is_empty() {
        None
    } else {
        Some(assumptions.join(" / "))
    };

    (scores, joined)
}

/// フィールドスコアからマッチ率を算出する（唯一の算出経路）
///
/// 各スコアは重み付き済みなので直接合計し、小数1桁に丸める。
/// 欠落エントリは 0 扱い（FieldScores のデフォルト値）。
pub fn aggregate(scores: &FieldScores) -> f64 {
    (scores.total() as f64 * 10.0).round() / 10.0
}

/// 上流が付けてきた生のフィールドスコアを検証・補正する
///
/// 純粋・全域。数値でない値・NaN・負値は 0、上限は各次元の重み。
/// 戻り値は必ず [`aggregate`] で再集約すること。
pub fn validate_upstream_scores(
    raw: &HashMap<String, Value>,
    weights: &WeightTable,
) -> FieldScores {
    let mut scores = FieldScores::default();

    for dimension in Dimension::ALL {
        let value = raw
            .get(dimension.as_str())
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        scores.set(dimension, clamp_score(value, weights.weight(dimension)));
    }

    scores
}

/// 計算済みスコアを再クランプする（既に妥当なら恒等変換）
pub fn revalidate_scores(scores: &FieldScores, weights: &WeightTable) -> FieldScores {
    let mut result = FieldScores::default();
    for dimension in Dimension::ALL {
        result.set(
            dimension,
            clamp_score(scores.get(dimension) as f64, weights.weight(dimension)),
        );
    }
    result
}

fn clamp_score(value: f64, weight: u32) -> i64 {
    if !value.is_finite() || value < 0.0 {
        return 0;
    }
    (value.round() as i64).min(weight as i64)
}
