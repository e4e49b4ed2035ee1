//! 材料からの保守的推定
//!
//! ドリンク属性が欠落している場合のみ使用する。
//! 柑橘類→酸味高、クリーム系→甘味高、ドライベルモット→辛口・苦味。

use crate::normalizer::Dimension;

const HIGH_ACIDITY_INGREDIENTS: &[&str] = &["lime", "lemon", "citrus", "grapefruit", "yuzu"];

const HIGH_SWEETNESS_INGREDIENTS: &[&str] =
    &["cream", "amaretto", "liqueur", "syrup", "honey", "chocolate"];

const BITTER_INGREDIENTS: &[&str] = &["bitters", "campari", "amaro", "dry vermouth"];

/// 材料リストから属性を推定する
///
/// # Returns
/// `Some((カノニカル値, 根拠となった材料))`。推定できない場合は `None`。
pub fn infer_attribute(dimension: Dimension, ingredients: &[String]) -> Option<(String, String)> {
    match dimension {
        Dimension::Acidity => {
            find_ingredient(ingredients, HIGH_ACIDITY_INGREDIENTS)
                .map(|hit| ("High".to_string(), hit))
        }
        Dimension::Sweetness => {
            // ドライベルモットは甘味の否定材料なので先に判定
            if let Some(hit) = find_ingredient(ingredients, &["dry vermouth"]) {
                return Some(("Dry".to_string(), hit));
            }
            find_ingredient(ingredients, HIGH_SWEETNESS_INGREDIENTS)
                .map(|hit| ("High".to_string(), hit))
        }
        Dimension::Bitterness => {
            find_ingredient(ingredients, BITTER_INGREDIENTS)
                .map(|hit| ("Medium".to_string(), hit))
        }
        // 酒種・強さ・グラス・辛味は材料から確信を持って推定できない
        _ => None,
    }
}

fn find_ingredient(ingredients: &[String], keywords: &[&str]) -> Option<String> {
    for ingredient in ingredients {
        let lower = ingredient.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k)) {
            return Some(ingredient.trim().to_string());
        }
    }
    None
}
