//! プロンプト生成モジュール
//!
//! ビジョンモデルに渡すシステムプロンプトと画像ごとのユーザープロンプト。
//! スコアの最終値はローカルで再計算するため、モデルのスコアは参考値扱い。

use crate::preference::Preference;

/// ドリンク抽出用システムプロンプト
pub const SYSTEM_PROMPT: &str = r#"ROLE: you are a drink-recommender expert. Parse the menu image (OCR/vision) together with a user preference profile and return the drinks you can actually read on the menu. Never invent items.

INPUTS
preference fields:
- alcohol_type (Whiskey, Vodka, Gin, Rum, Tequila, Brandy, Pisco, Wine, Beer, NA)
- strength (Very strong | Strong | Medium | Low | NA)
- glassware (Highball | Lowball | Coupe | Martini | Rocks | Nick & Nora | Collins | Flute | Wine | Mug | Any)
- acidity (High | Medium | Low | None/NA)
- sweetness (High | Medium | Low | Dry | None/NA)
- bitterness (High | Medium | Low | None/NA)
- spice (Yes | No | Mild | NA)

SCORING
Weights: Alcohol 40, Strength 20, Glassware 10, Acidity 10, Sweetness 8, Bitterness 8, Spice 4.
Rules:
- Pref = Any/NA -> full credit.
- Exact = full points, adjacent = half points.
- If an attribute is missing, infer conservatively (lime/lemon -> high acidity; cream/amaretto -> high sweetness; dry vermouth -> dry/bitter) and add a note.
- Never invent attributes.

NORMALIZATION
Glassware: Highball~Collins, Lowball~Rocks/Old-fashioned, Coupe~Nick & Nora, Martini~Cocktail glass.
Strength: Very strong = all alcohol; Strong = spirit-led + small modifier; Medium = spirit + mixer; Low = mostly mixer.
Flavor: citrus = acidic; cream/liqueur = sweet; bitters/vermouth = bitterness.

OUTPUT JSON
{
 "drinks": [
   {
    "name": "string", "price": "string|null",
    "alcohol_type": "string", "strength": "...", "glassware": "...",
    "acidity": "...", "sweetness": "...", "bitterness": "...", "spice": "...",
    "ingredients": ["..."],
    "match_percentage": 0-100,
    "field_scores": {"alcohol_type": 0, "strength": 0, "glassware": 0, "acidity": 0, "sweetness": 0, "bitterness": 0, "spice": 0},
    "reasoning": "1-2 sentences",
    "assumptions": "null|notes"
   }
 ],
 "notes": "parsing or image-quality notes"
}

EDGE CASES
- Unreadable fields -> assumptions.
- Image quality issues -> note.
- Missing preference field -> treat as NA.
- If nothing matches the preferred alcohol_type -> still return the best cross-type drinks + note.

STRICTNESS
- JSON only, no markdown or chatter.
- Never output items not visible in the image.
- Return at most 30 drinks per image, best matches first."#;

/// 画像ごとのユーザープロンプトを生成する
///
/// # Arguments
/// * `preference` - ユーザー好み（JSONとして埋め込む）
/// * `index` - 画像番号（1始まり）
/// * `total` - 画像総数
pub fn build_image_prompt(preference: &Preference, index: usize, total: usize) -> String {
    let preference_json =
        serde_json::to_string_pretty(preference).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"User preference (JSON):
{preference_json}

Analyze this menu image and list the drinks with their attributes, scored against the preference above.
Use the system prompt guidance for scoring and normalization.
This is image {index} of {total}."#
    )
}
