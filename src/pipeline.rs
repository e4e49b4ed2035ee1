//! ランキングパイプライン
//!
//! 1リクエスト分のフローを束ねる:
//! 画像ごとの抽出（逐次）→ タグ付け → プール → 重複除去 →
//! スコア付与/検証 → ソート → 上限切り詰め → レポート生成。
//!
//! 画像単体の失敗はメモに記録して続行する。リクエスト全体が失敗するのは
//! 入力なし・全画像からドリンクゼロ、の2つだけ。

use crate::config::Config;
use crate::dedupe;
use crate::drink::{CandidateDrink, Diagnostics, MatchReport, ScoredDrink};
use crate::error::{MenuAiError, Result};
use crate::extractor::DrinkExtractor;
use crate::loader::MenuImage;
use crate::normalizer::Dimension;
use crate::preference::Preference;
use crate::scorer::{self, WeightTable};
use std::cmp::Ordering;

/// パイプライン設定（グローバル状態ではなく構築時に渡す）
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_images: usize,
    pub max_results: usize,
    pub weights: WeightTable,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_images: 10,
            max_results: 30,
            weights: WeightTable::default(),
        }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_images: config.max_images,
            max_results: config.max_results,
            weights: WeightTable::default(),
        }
    }
}

/// 抽出元画像の番号を保持した候補
struct TaggedDrink {
    drink: CandidateDrink,
    source_image: usize,
}

pub struct Pipeline {
    extractor: Box<dyn DrinkExtractor>,
    options: PipelineOptions,
}

impl Pipeline {
    /// パイプラインを構築する。重み表の不整合はここで弾く。
    pub fn new(extractor: Box<dyn DrinkExtractor>, options: PipelineOptions) -> Result<Self> {
        options.weights.validate()?;
        Ok(Self { extractor, options })
    }

    pub async fn run(&self, preference: &Preference, images: &[MenuImage]) -> Result<MatchReport> {
        self.run_with_progress(preference, images, |_, _| {}).await
    }

    /// 進捗コールバック付き実行
    ///
    /// # Arguments
    /// * `on_progress` - (処理中の画像番号, 総数)
    pub async fn run_with_progress(
        &self,
        preference: &Preference,
        images: &[MenuImage],
        on_progress: impl Fn(usize, usize),
    ) -> Result<MatchReport> {
        if images.is_empty() {
            return Err(MenuAiError::NoImages);
        }
        if images.len() > self.options.max_images {
            return Err(MenuAiError::TooManyImages {
                count: images.len(),
                max: self.options.max_images,
            });
        }

        let total = images.len();
        let mut pooled: Vec<TaggedDrink> = Vec::new();
        let mut notes: Vec<String> = Vec::new();

        // レート制限対策のため逐次実行（1枚ずつawait）
        for (i, image) in images.iter().enumerate() {
            let index = i + 1;
            on_progress(index, total);

            match self.extractor.extract(preference, image, index, total).await {
                Ok(extraction) => {
                    if let Some(note) = extraction.notes {
                        notes.push(format!("画像 {}: {}", index, note));
                    }
                    pooled.extend(extraction.drinks.into_iter().map(|drink| TaggedDrink {
                        drink,
                        source_image: index,
                    }));
                }
                // 1枚の失敗でリクエスト全体を落とさない
                Err(e) => {
                    notes.push(format!("画像 {}: 処理に失敗しました - {}", index, e));
                }
            }
        }

        let total_drinks_found = pooled.len();

        let unique = dedupe::dedupe_by_name(pooled, |t| t.drink.name.as_str());
        let unique_drinks = unique.len();

        let mut scored: Vec<ScoredDrink> = unique
            .into_iter()
            .map(|tagged| self.score_one(preference, tagged))
            .collect();

        sort_by_match(&mut scored);

        if unique_drinks > self.options.max_results {
            scored.truncate(self.options.max_results);
            notes.push(format!(
                "マッチ上位{}件に絞り込みました（候補{}件）",
                self.options.max_results, unique_drinks
            ));
        }

        if scored.is_empty() {
            return Err(MenuAiError::EmptyResult {
                notes: notes.join(" | "),
            });
        }

        let drinks_shown = scored.len();

        Ok(MatchReport {
            status: "ok".to_string(),
            preference: preference.standardize(),
            drinks: scored,
            sorted_by: "match_percentage (enforced)".to_string(),
            notes: notes.join(" | "),
            diagnostics: Diagnostics {
                images_processed: total,
                total_drinks_found,
                unique_drinks,
                drinks_shown,
            },
            generated_at: chrono::Utc::now(),
        })
    }

    /// 1件をスコア付与（または上流スコアの検証）して最終形にする
    ///
    /// マッチ率は常に集約器で再計算する。上流が何を返していても、
    /// レンジ外・不整合なスコアは外に出ない。
    fn score_one(&self, preference: &Preference, tagged: TaggedDrink) -> ScoredDrink {
        let drink = tagged.drink;
        let weights = &self.options.weights;

        let (field_scores, inferred) = match &drink.upstream_field_scores {
            Some(raw) => (scorer::validate_upstream_scores(raw, weights), None),
            None => scorer::score_drink(preference, &drink, weights),
        };

        let match_percentage = scorer::aggregate(&field_scores);

        let assumptions = match (drink.assumptions, inferred) {
            (Some(upstream), Some(local)) => Some(format!("{} / {}", upstream, local)),
            (Some(upstream), None) => Some(upstream),
            (None, local) => local,
        };

        ScoredDrink {
            name: drink.name,
            price: drink.price,
            alcohol_type: attribute_display(&drink.alcohol_type, Dimension::AlcoholType),
            strength: attribute_display(&drink.strength, Dimension::Strength),
            glassware: attribute_display(&drink.glassware, Dimension::Glassware),
            acidity: attribute_display(&drink.acidity, Dimension::Acidity),
            sweetness: attribute_display(&drink.sweetness, Dimension::Sweetness),
            bitterness: attribute_display(&drink.bitterness, Dimension::Bitterness),
            spice: attribute_display(&drink.spice, Dimension::Spice),
            ingredients: drink.ingredients,
            description: drink.description,
            field_scores,
            match_percentage,
            reasoning: drink.reasoning,
            assumptions,
            source_image: tagged.source_image,
        }
    }
}

/// 表示用属性: 正規化した表記に統一する（未知の値も捨てない）
fn attribute_display(raw: &Option<String>, dimension: Dimension) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| crate::normalizer::normalize(dimension, v))
}

/// マッチ率降順、同率は名前（大文字小文字無視）の昇順
fn sort_by_match(drinks: &mut [ScoredDrink]) {
    drinks.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
