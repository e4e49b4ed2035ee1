//! ドリンクメニューAI解析・好みマッチングツール
//!
//! メニュー画像を外部ビジョンモデルで解析し、抽出したドリンクを
//! ユーザーの好みプロファイルに対してスコアリング・ランキングする。

pub mod cli;
pub mod config;
pub mod dedupe;
pub mod drink;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod preference;
pub mod scorer;
