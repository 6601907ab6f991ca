//! パス正規化
//!
//! ファイルシステムのパスとストレージキーのプレフィックスを
//! `/` 区切りの共通形式に揃える純粋関数群。

use std::path::MAIN_SEPARATOR;

/// 先頭を `/` ちょうど1つにする
pub fn ensure_leading_slash(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// 末尾を `/` ちょうど1つにする
pub fn ensure_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// 先頭の `/` をすべて除去
pub fn strip_leading_slash(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// 末尾の `/` をすべて除去
pub fn strip_trailing_slash(path: &str) -> String {
    path.trim_end_matches('/').to_string()
}

/// S3プレフィックスを正規化（先頭 `/` なし、末尾 `/` あり）
///
/// `/` だけで構成された入力は空文字列（バケットのルート）になる。
pub fn normalize_s3_prefix(prefix: &str) -> String {
    strip_leading_slash(&ensure_trailing_slash(prefix))
}

/// 区切り文字を `/` に揃え、末尾の `/` を除去
pub fn normalize_path(path: &str) -> String {
    normalize_path_with_separator(path, MAIN_SEPARATOR)
}

/// 区切り文字を指定して正規化
///
/// `separator` が `/` 以外の場合、連続するバックスラッシュを1つの `/` に置換する。
pub fn normalize_path_with_separator(path: &str, separator: char) -> String {
    if separator == '/' {
        return strip_trailing_slash(path);
    }

    let mut converted = String::with_capacity(path.len());
    let mut in_backslash_run = false;
    for c in path.chars() {
        if c == '\\' {
            if !in_backslash_run {
                converted.push('/');
            }
            in_backslash_run = true;
        } else {
            converted.push(c);
            in_backslash_run = false;
        }
    }
    strip_trailing_slash(&converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_leading_slash() {
        assert_eq!(ensure_leading_slash("frontend"), "/frontend");
        assert_eq!(ensure_leading_slash("///frontend"), "/frontend");
        assert_eq!(ensure_leading_slash(""), "/");
    }

    #[test]
    fn test_ensure_leading_slash_idempotent() {
        for input in ["", "/", "a", "/a", "//a/b/", "a//b", "\\a"] {
            let once = ensure_leading_slash(input);
            assert_eq!(ensure_leading_slash(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_ensure_trailing_slash() {
        assert_eq!(ensure_trailing_slash("logs"), "logs/");
        assert_eq!(ensure_trailing_slash("logs///"), "logs/");
        assert_eq!(ensure_trailing_slash(""), "/");
    }

    #[test]
    fn test_strip_slashes() {
        assert_eq!(strip_leading_slash("//a/b/"), "a/b/");
        assert_eq!(strip_trailing_slash("//a/b//"), "//a/b");
        assert_eq!(strip_leading_slash("a"), "a");
        assert_eq!(strip_trailing_slash("///"), "");
    }

    #[test]
    fn test_normalize_s3_prefix() {
        assert_eq!(normalize_s3_prefix("/frontend"), "frontend/");
        assert_eq!(normalize_s3_prefix("frontend/"), "frontend/");
        assert_eq!(normalize_s3_prefix("//a/b//"), "a/b/");
        assert_eq!(normalize_s3_prefix("logs"), "logs/");
    }

    #[test]
    fn test_normalize_s3_prefix_shape() {
        for input in ["a", "/a", "a/", "//a//", "a/b", "/assets", " x "] {
            let prefix = normalize_s3_prefix(input);
            assert!(!prefix.starts_with('/'), "{:?} -> {:?}", input, prefix);
            assert!(prefix.ends_with('/'), "{:?} -> {:?}", input, prefix);
        }
    }

    #[test]
    fn test_normalize_s3_prefix_only_slashes() {
        // スラッシュのみはルートを表す空文字列
        assert_eq!(normalize_s3_prefix("/"), "");
        assert_eq!(normalize_s3_prefix("///"), "");
    }

    #[test]
    fn test_normalize_path_posix() {
        assert_eq!(normalize_path_with_separator("build/", '/'), "build");
        assert_eq!(normalize_path_with_separator("build/img//", '/'), "build/img");
        // POSIXではバックスラッシュはファイル名の一部
        assert_eq!(
            normalize_path_with_separator("build\\img", '/'),
            "build\\img"
        );
    }

    #[test]
    fn test_normalize_path_windows_separator() {
        assert_eq!(
            normalize_path_with_separator("build\\img\\logo.png", '\\'),
            "build/img/logo.png"
        );
        assert_eq!(
            normalize_path_with_separator("C:\\\\site\\\\", '\\'),
            "C:/site"
        );
        assert_eq!(normalize_path_with_separator("a/b\\", '\\'), "a/b");
    }

    #[test]
    fn test_normalize_path_uses_platform_separator() {
        assert_eq!(normalize_path("build/"), "build");
    }
}
