//! 属性正規化モジュール
//!
//! ドリンクの7次元属性（酒種・強さ・グラス・酸味・甘味・苦味・辛味）の
//! 表記揺れをカノニカル値に統一する。
//!
//! ## 処理フロー
//! 1. trim + 小文字化してエイリアス表と照合
//! 2. 一致しない値は先頭大文字化のみ行いそのまま保持（情報を捨てない）
//! 3. 空値・"Any"・"NA" は「指定なし」センチネルに正規化

/// 「指定なし」センチネル。どの実カテゴリとも一致しない。
pub const DONT_CARE: &str = "NA";

/// 7つの味覚・提供次元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    AlcoholType,
    Strength,
    Glassware,
    Acidity,
    Sweetness,
    Bitterness,
    Spice,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::AlcoholType,
        Dimension::Strength,
        Dimension::Glassware,
        Dimension::Acidity,
        Dimension::Sweetness,
        Dimension::Bitterness,
        Dimension::Spice,
    ];

    /// JSONフィールド名
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::AlcoholType => "alcohol_type",
            Dimension::Strength => "strength",
            Dimension::Glassware => "glassware",
            Dimension::Acidity => "acidity",
            Dimension::Sweetness => "sweetness",
            Dimension::Bitterness => "bitterness",
            Dimension::Spice => "spice",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 指定なしセンチネルか判定
pub fn is_dont_care(value: &str) -> bool {
    value == DONT_CARE
}

/// 生テキストをカノニカル値に正規化する
///
/// # Arguments
/// * `dimension` - 対象の次元
/// * `raw` - 自由記述の値
///
/// # Returns
/// カノニカル値。空値・"Any"・"NA" は [`DONT_CARE`]。
/// 未知の値は trim + 先頭大文字化のみで保持する。
pub fn normalize(dimension: Dimension, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DONT_CARE.to_string();
    }

    let lower = trimmed.to_lowercase();
    if matches!(
        lower.as_str(),
        "any" | "na" | "n/a" | "none/na" | "no preference" | "don't care"
    ) {
        return DONT_CARE.to_string();
    }

    let canonical = match dimension {
        Dimension::AlcoholType => normalize_alcohol_type(&lower),
        Dimension::Strength => normalize_strength(&lower),
        Dimension::Glassware => normalize_glassware(&lower),
        Dimension::Acidity | Dimension::Bitterness => normalize_flavor_level(&lower),
        Dimension::Sweetness => normalize_sweetness(&lower),
        Dimension::Spice => normalize_spice(&lower),
    };

    match canonical {
        Some(value) => value.to_string(),
        None => capitalize_first(trimmed),
    }
}

fn normalize_alcohol_type(lower: &str) -> Option<&'static str> {
    match lower {
        "whiskey" | "whisky" | "bourbon" | "rye" | "scotch" => Some("Whiskey"),
        "vodka" => Some("Vodka"),
        "gin" => Some("Gin"),
        "rum" => Some("Rum"),
        "tequila" | "mezcal" => Some("Tequila"),
        "brandy" | "cognac" => Some("Brandy"),
        "pisco" => Some("Pisco"),
        "wine" => Some("Wine"),
        "beer" => Some("Beer"),
        _ => None,
    }
}

fn normalize_strength(lower: &str) -> Option<&'static str> {
    match lower {
        "very strong" | "extra strong" | "boozy" | "spirit-forward" | "spirit forward" => {
            Some("Very strong")
        }
        "strong" | "high" => Some("Strong"),
        "medium" | "normal" | "moderate" => Some("Medium"),
        "low" | "weak" | "light" | "mild" => Some("Low"),
        _ => None,
    }
}

fn normalize_glassware(lower: &str) -> Option<&'static str> {
    match lower {
        "highball" | "highball glass" => Some("Highball"),
        "collins" | "collins glass" => Some("Collins"),
        "lowball" | "lowball glass" => Some("Lowball"),
        "rocks" | "rocks glass" | "on the rocks" => Some("Rocks"),
        "old fashioned" | "old-fashioned" | "old fashioned glass" => Some("Old-fashioned"),
        "coupe" | "coupe glass" => Some("Coupe"),
        "nick & nora" | "nick and nora" | "nick&nora" => Some("Nick & Nora"),
        "martini" | "martini glass" => Some("Martini"),
        "cocktail" | "cocktail glass" => Some("Cocktail"),
        "flute" | "champagne flute" => Some("Flute"),
        "wine" | "wine glass" => Some("Wine"),
        "mug" | "copper mug" => Some("Mug"),
        _ => None,
    }
}

fn normalize_flavor_level(lower: &str) -> Option<&'static str> {
    match lower {
        "high" | "strong" => Some("High"),
        "medium" | "moderate" | "normal" => Some("Medium"),
        "low" | "mild" | "light" | "slight" => Some("Low"),
        "none" | "no" | "zero" => Some("None"),
        _ => None,
    }
}

fn normalize_sweetness(lower: &str) -> Option<&'static str> {
    match lower {
        "dry" | "bone dry" | "bone-dry" => Some("Dry"),
        _ => normalize_flavor_level(lower),
    }
}

fn normalize_spice(lower: &str) -> Option<&'static str> {
    match lower {
        "yes" | "spicy" | "hot" | "high" => Some("Yes"),
        "mild" | "slight" | "medium" => Some("Mild"),
        // 否定表現はすべて Low に畳み込む
        "no" | "none" | "zero" | "not spicy" | "low" => Some("Low"),
        _ => None,
    }
}

/// 2つのカノニカル値が隣接クラス（部分点対象）か判定
///
/// 完全一致は隣接とみなさない。次元ごとの定義:
/// - strength / 風味次元: 順序尺度で1段差
/// - glassware: 同じ近似クラス（Highball≈Collins 等）
/// - spice: Mild が Yes / Low の両方に隣接
/// - alcohol_type: 隣接なし（完全一致のみ）
pub fn is_adjacent(dimension: Dimension, a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }

    match dimension {
        Dimension::AlcoholType => false,
        Dimension::Strength => adjacent_on_scale(strength_rank(a), strength_rank(b)),
        Dimension::Glassware => glassware_class(a)
            .zip(glassware_class(b))
            .map(|(ca, cb)| ca == cb)
            .unwrap_or(false),
        Dimension::Acidity | Dimension::Sweetness | Dimension::Bitterness => {
            adjacent_on_scale(flavor_rank(a), flavor_rank(b))
        }
        Dimension::Spice => adjacent_on_scale(spice_rank(a), spice_rank(b)),
    }
}

/// 順序尺度上で同ランクまたは1段差なら隣接
fn adjacent_on_scale(a: Option<i8>, b: Option<i8>) -> bool {
    match (a, b) {
        (Some(ra), Some(rb)) => (ra - rb).abs() <= 1,
        _ => false,
    }
}

fn strength_rank(value: &str) -> Option<i8> {
    match value {
        "Very strong" => Some(3),
        "Strong" => Some(2),
        "Medium" => Some(1),
        "Low" => Some(0),
        _ => None,
    }
}

fn flavor_rank(value: &str) -> Option<i8> {
    match value {
        "High" => Some(3),
        "Medium" => Some(2),
        // Dry はシロップ感のなさ、None は風味ゼロ。いずれも Low 相当として扱う
        "Low" | "Dry" => Some(1),
        "None" => Some(0),
        _ => None,
    }
}

fn spice_rank(value: &str) -> Option<i8> {
    match value {
        "Yes" => Some(2),
        "Mild" => Some(1),
        "Low" => Some(0),
        _ => None,
    }
}

/// グラス近似クラス（同クラス内は隣接マッチ）
fn glassware_class(value: &str) -> Option<u8> {
    match value {
        "Highball" | "Collins" => Some(0),
        "Lowball" | "Rocks" | "Old-fashioned" => Some(1),
        "Coupe" | "Nick & Nora" => Some(2),
        "Martini" | "Cocktail" => Some(3),
        _ => None,
    }
}

/// 先頭文字のみ大文字化（残りは小文字化）
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
