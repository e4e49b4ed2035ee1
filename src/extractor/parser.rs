//! 抽出レスポンスのパーサー
//!
//! モデルのレスポンスからJSONを取り出し、候補ドリンクに変換する。
//! 多少の逸脱（markdownフェンス、数値の価格、文字列の欠落）は許容する。

use crate::drink::CandidateDrink;
use crate::error::{MenuAiError, Result};
use crate::extractor::ImageExtraction;
use regex::Regex;
use serde_json::{Map, Value};

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. 生の [...] 配列
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    // 生の [...] を探す
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(MenuAiError::ApiParse("JSONが見つかりません".into()))
}

/// 抽出レスポンスをパースする
///
/// レスポンスは `{"drinks": [...], "notes": "..."}` 形式、
/// または裸のドリンク配列を受け付ける。`drinks` が配列でなければ
/// [`MenuAiError::MalformedResult`]。名前のないドリンクは捨てて
/// メモに件数を残す。
pub fn parse_extraction_response(response: &str) -> Result<ImageExtraction> {
    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| MenuAiError::ApiParse(format!("JSONパースエラー: {}", e)))?;

    let (drinks_value, mut notes) = match &value {
        Value::Object(map) => (
            map.get("drinks").cloned().unwrap_or(Value::Null),
            get_string(map, "notes"),
        ),
        Value::Array(_) => (value.clone(), None),
        _ => {
            return Err(MenuAiError::MalformedResult(
                "オブジェクトでも配列でもありません".into(),
            ))
        }
    };

    let Some(items) = drinks_value.as_array() else {
        return Err(MenuAiError::MalformedResult(
            "drinks が配列ではありません".into(),
        ));
    };

    let mut drinks = Vec::with_capacity(items.len());
    let mut unnamed = 0usize;

    for item in items {
        match item.as_object().and_then(parse_drink) {
            Some(drink) => drinks.push(drink),
            None => unnamed += 1,
        }
    }

    if unnamed > 0 {
        let warning = format!("名前のない候補を{}件無視しました", unnamed);
        notes = Some(match notes {
            Some(existing) => format!("{} / {}", existing, warning),
            None => warning,
        });
    }

    Ok(ImageExtraction { drinks, notes })
}

/// 1件のドリンクオブジェクトを変換。名前がなければ None。
fn parse_drink(map: &Map<String, Value>) -> Option<CandidateDrink> {
    let name = get_string(map, "name")?;
    if name.trim().is_empty() {
        return None;
    }

    Some(CandidateDrink {
        name: name.trim().to_string(),
        price: get_string(map, "price").as_deref().and_then(clean_price),
        alcohol_type: get_string(map, "alcohol_type"),
        strength: get_string(map, "strength"),
        glassware: get_string(map, "glassware"),
        acidity: get_string(map, "acidity"),
        sweetness: get_string(map, "sweetness"),
        bitterness: get_string(map, "bitterness"),
        spice: get_string(map, "spice"),
        ingredients: get_string_list(map, "ingredients"),
        description: get_string(map, "description"),
        reasoning: get_string(map, "reasoning"),
        assumptions: get_string(map, "assumptions"),
        upstream_field_scores: map
            .get("field_scores")
            .and_then(Value::as_object)
            .map(|scores| scores.clone().into_iter().collect()),
        upstream_match_percentage: map.get("match_percentage").and_then(Value::as_f64),
    })
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if value.is_null() {
        return None;
    }
    // 数値などは文字列化して保持
    if value.is_number() || value.is_boolean() {
        return Some(value.to_string());
    }
    None
}

fn get_string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// 価格文字列から通貨付き数値部分を取り出す
///
/// OCR由来の前後の飾り文字を落とす。数字が含まれない価格は捨てる。
fn clean_price(raw: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref PRICE_RE: Regex = Regex::new(r"[¥$€£]?\s?\d[\d,.]*").unwrap();
    }
    PRICE_RE.find(raw).map(|m| m.as_str().trim().to_string())
}
