//! ドリンク重複除去
//!
//! 複数画像から抽出したドリンクを名前で一意化する。
//! キーは trim + 小文字化した名前。初出を無条件で残し、
//! 後続の同名ドリンクは（別画像由来でも）破棄する。

use std::collections::HashSet;

/// 名前キーで安定的に重複除去する
///
/// 初出順を保持する。キー抽出はクロージャで渡す。
pub fn dedupe_by_name<T, F>(items: Vec<T>, name_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        let key = name_of(&item).trim().to_lowercase();
        if seen.insert(key) {
            unique.push(item);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named {
        name: String,
        source: usize,
    }

    fn named(name: &str, source: usize) -> Named {
        Named {
            name: name.to_string(),
            source,
        }
    }

    #[test]
    fn test_dedupe_case_insensitive_first_wins() {
        let drinks = vec![
            named("Old Fashioned", 1),
            named("Negroni", 1),
            named("OLD FASHIONED", 2),
            named("old fashioned ", 3),
        ];

        let unique = dedupe_by_name(drinks, |d| &d.name);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Old Fashioned");
        assert_eq!(unique[0].source, 1); // 初出（画像1）が残る
        assert_eq!(unique[1].name, "Negroni");
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let drinks = vec![named("B", 1), named("A", 1), named("C", 2), named("A", 2)];
        let unique = dedupe_by_name(drinks, |d| &d.name);
        let names: Vec<&str> = unique.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_dedupe_idempotent() {
        let drinks = vec![named("A", 1), named("a", 2), named("B", 2)];
        let once = dedupe_by_name(drinks, |d| &d.name);
        let twice = dedupe_by_name(once.clone(), |d| &d.name);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedupe_empty_input() {
        let drinks: Vec<Named> = vec![];
        assert!(dedupe_by_name(drinks, |d| &d.name).is_empty());
    }
}
