//! メニュー画像の収集と前処理
//!
//! CLI引数（ファイル/フォルダ混在）を画像リストに展開し、
//! アップロード前に長辺を上限サイズへ縮小する。

use crate::error::{MenuAiError, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// アップロード対象の1画像
#[derive(Debug, Clone)]
pub struct MenuImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// 入力パス（ファイル/フォルダ混在）を画像パスのリストに展開する
///
/// フォルダは直下のみスキャンし、ファイル名順に並べる。
pub fn collect_image_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(MenuAiError::FileNotFound(input.display().to_string()));
        }

        if input.is_dir() {
            paths.extend(scan_folder(input));
        } else {
            if !has_image_extension(input) {
                return Err(MenuAiError::ImageLoad(format!(
                    "対応していない画像形式です: {}",
                    input.display()
                )));
            }
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && has_image_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    // ファイル名でソート
    images.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    images
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let lower = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|&e| e == lower)
        })
        .unwrap_or(false)
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// 画像パスを読み込み、必要なら縮小して [`MenuImage`] に変換する
///
/// 長辺が `max_image_size` を超える画像はJPEGに再エンコードする。
pub fn load_images(paths: &[PathBuf], max_image_size: u32) -> Result<Vec<MenuImage>> {
    paths
        .iter()
        .map(|path| prepare_image(path, max_image_size))
        .collect()
}

fn prepare_image(path: &Path, max_image_size: u32) -> Result<MenuImage> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;

    let img = image::load_from_memory(&bytes).map_err(|e| {
        MenuAiError::ImageLoad(format!("{}: {}", path.display(), e))
    })?;

    if img.width().max(img.height()) <= max_image_size {
        return Ok(MenuImage {
            file_name,
            bytes,
            mime_type: mime_type(path).to_string(),
        });
    }

    // 縮小してJPEG再エンコード（アルファは落とす）
    let resized = img.resize(
        max_image_size,
        max_image_size,
        image::imageops::FilterType::Lanczos3,
    );
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut encoded = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Jpeg)
        .map_err(|e| MenuAiError::ImageLoad(format!("{}: 再エンコード失敗: {}", path.display(), e)))?;

    Ok(MenuImage {
        file_name,
        bytes: encoded,
        mime_type: "image/jpeg".to_string(),
    })
}
