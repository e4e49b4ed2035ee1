use crate::preference::Preference;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-ai")]
#[command(about = "ドリンクメニューAI解析・好みマッチングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// メニュー画像を解析して好みに合うドリンクをランキング
    Match {
        /// メニュー画像ファイルまたはフォルダ
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 好みプロファイルJSONファイル（フラグ指定が優先される）
        #[arg(short, long)]
        preference: Option<PathBuf>,

        #[command(flatten)]
        preference_flags: PreferenceArgs,

        /// 結果JSONの出力先（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 表示件数の上限（デフォルト: 30）
        #[arg(long)]
        max_drinks: Option<usize>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 好みプロファイルのフラグ指定（7次元すべて省略可能）
#[derive(Args, Debug, Default)]
pub struct PreferenceArgs {
    /// 酒の種類 (Whiskey/Vodka/Gin/Rum/Tequila/...)
    #[arg(long)]
    pub alcohol_type: Option<String>,

    /// 強さ (Very strong/Strong/Medium/Low)
    #[arg(long)]
    pub strength: Option<String>,

    /// グラス (Highball/Lowball/Coupe/Martini/...)
    #[arg(long)]
    pub glassware: Option<String>,

    /// 酸味 (High/Medium/Low)
    #[arg(long)]
    pub acidity: Option<String>,

    /// 甘味 (High/Medium/Low/Dry)
    #[arg(long)]
    pub sweetness: Option<String>,

    /// 苦味 (High/Medium/Low)
    #[arg(long)]
    pub bitterness: Option<String>,

    /// 辛味 (Yes/Mild/No)
    #[arg(long)]
    pub spice: Option<String>,
}

impl PreferenceArgs {
    /// ベースの好み（ファイル由来）にフラグ指定を上書きする
    pub fn apply(self, base: Preference) -> Preference {
        Preference {
            alcohol_type: self.alcohol_type.or(base.alcohol_type),
            strength: self.strength.or(base.strength),
            glassware: self.glassware.or(base.glassware),
            acidity: self.acidity.or(base.acidity),
            sweetness: self.sweetness.or(base.sweetness),
            bitterness: self.bitterness.or(base.bitterness),
            spice: self.spice.or(base.spice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_preference() {
        let base = Preference {
            alcohol_type: Some("Gin".into()),
            strength: Some("Low".into()),
            ..Default::default()
        };
        let flags = PreferenceArgs {
            alcohol_type: Some("Whiskey".into()),
            ..Default::default()
        };

        let merged = flags.apply(base);
        assert_eq!(merged.alcohol_type.as_deref(), Some("Whiskey"));
        assert_eq!(merged.strength.as_deref(), Some("Low"));
    }

    #[test]
    fn test_cli_parses_match_command() {
        let cli = Cli::try_parse_from([
            "menu-ai",
            "match",
            "menu1.jpg",
            "menu2.jpg",
            "--alcohol-type",
            "Whiskey",
            "--strength",
            "Very strong",
            "-o",
            "result.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Match {
                inputs,
                preference_flags,
                output,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(preference_flags.alcohol_type.as_deref(), Some("Whiskey"));
                assert_eq!(preference_flags.strength.as_deref(), Some("Very strong"));
                assert_eq!(output, Some(PathBuf::from("result.json")));
            }
            _ => panic!("Matchコマンドとしてパースされるべき"),
        }
    }

    #[test]
    fn test_cli_parses_config_command() {
        let cli = Cli::try_parse_from(["menu-ai", "config", "--show"]).unwrap();
        match cli.command {
            Commands::Config { show, set_api_key } => {
                assert!(show);
                assert!(set_api_key.is_none());
            }
            _ => panic!("Configコマンドとしてパースされるべき"),
        }
    }
}
