//! ユーザー好みプロファイル
//!
//! 7次元すべて省略可能。省略は「指定なし」として扱う。

use crate::normalizer::{self, Dimension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glassware: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acidity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitterness: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice: Option<String>,
}

impl Preference {
    /// 次元ごとの生値を取得
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::AlcoholType => self.alcohol_type.as_deref(),
            Dimension::Strength => self.strength.as_deref(),
            Dimension::Glassware => self.glassware.as_deref(),
            Dimension::Acidity => self.acidity.as_deref(),
            Dimension::Sweetness => self.sweetness.as_deref(),
            Dimension::Bitterness => self.bitterness.as_deref(),
            Dimension::Spice => self.spice.as_deref(),
        }
    }

    /// 全次元が未指定か
    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| {
            self.get(*d)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
    }

    /// 表示用に表記を統一したコピーを返す
    ///
    /// strength はエイリアス正規化、その他は先頭大文字化。
    /// 未指定フィールドはそのまま None。
    pub fn standardize(&self) -> Preference {
        let standardize_field = |dimension: Dimension| -> Option<String> {
            self.get(dimension).and_then(|raw| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(normalizer::normalize(dimension, trimmed))
                }
            })
        };

        Preference {
            alcohol_type: standardize_field(Dimension::AlcoholType),
            strength: standardize_field(Dimension::Strength),
            glassware: standardize_field(Dimension::Glassware),
            acidity: standardize_field(Dimension::Acidity),
            sweetness: standardize_field(Dimension::Sweetness),
            bitterness: standardize_field(Dimension::Bitterness),
            spice: standardize_field(Dimension::Spice),
        }
    }
}
