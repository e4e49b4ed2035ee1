use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`menu-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が指定されていません")]
    NoImages,

    #[error("画像が多すぎます: {count}枚（上限 {max}枚）")]
    TooManyImages { count: usize, max: usize },

    #[error("抽出エラー: {0}")]
    Extraction(String),

    #[error("抽出結果が不正な形式です: {0}")]
    MalformedResult(String),

    #[error("どの画像からもドリンクを抽出できませんでした{}", format_empty_notes(.notes))]
    EmptyResult { notes: String },

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),
}

/// 空振り時のメモをメッセージに連結する（メモなしなら何も足さない）
fn format_empty_notes(notes: &str) -> String {
    if notes.is_empty() {
        String::new()
    } else {
        format!("（{}）", notes)
    }
}

impl MenuAiError {
    /// リクエスト不備（入力なし等）かどうか
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            MenuAiError::NoImages | MenuAiError::TooManyImages { .. }
        )
    }

    /// 「何も見つからなかった」結果かどうか（サーバ障害とは区別する）
    pub fn is_empty_result(&self) -> bool {
        matches!(self, MenuAiError::EmptyResult { .. })
    }
}

pub type Result<T> = std::result::Result<T, MenuAiError>;
