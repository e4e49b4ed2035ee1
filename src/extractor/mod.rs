//! 抽出コラボレーター
//!
//! メニュー画像1枚と好みプロファイルを外部ビジョンモデルに渡し、
//! 候補ドリンクを受け取る境界。パイプラインからはトレイト越しに見える。

mod openai;
mod parser;
mod prompts;

pub use openai::OpenAiExtractor;
pub use parser::{extract_json, parse_extraction_response};
pub use prompts::{build_image_prompt, SYSTEM_PROMPT};

use crate::drink::CandidateDrink;
use crate::error::Result;
use crate::loader::MenuImage;
use crate::preference::Preference;
use async_trait::async_trait;

/// 1画像分の抽出結果
#[derive(Debug, Clone, Default)]
pub struct ImageExtraction {
    pub drinks: Vec<CandidateDrink>,
    pub notes: Option<String>,
}

/// 外部抽出サービスの抽象
///
/// 実装は1画像ごとに呼ばれる。呼び出し側（パイプライン）が
/// 逐次実行・失敗分離・結果の検証を受け持つ。
#[async_trait]
pub trait DrinkExtractor: Send + Sync {
    async fn extract(
        &self,
        preference: &Preference,
        image: &MenuImage,
        index: usize,
        total: usize,
    ) -> Result<ImageExtraction>;
}
