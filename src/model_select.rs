//! モデル選択
//!
//! 指定がなければプロバイダのモデル一覧から優先規則で自動選択する。
//! 規則は優先順の述語リストで、どれにも当たらなければ固定フォールバック。

use dialoguer::Select;

/// 自動選択の最終フォールバック
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";

/// 優先規則（上から順に評価）
struct PreferenceRule {
    label: &'static str,
    matches: fn(&str) -> bool,
}

const PREFERENCE_RULES: &[PreferenceRule] = &[
    PreferenceRule {
        label: "flash系の最新版",
        matches: |name| name.contains("flash") && name.contains("latest"),
    },
    PreferenceRule {
        label: "flash系",
        matches: |name| name.contains("flash"),
    },
    PreferenceRule {
        label: "pro系",
        matches: |name| name.contains("pro"),
    },
];

/// モデル一覧から優先規則で1つ選ぶ
///
/// 各規則を順に評価し、最初に該当したモデル（一覧順で先のもの）を返す。
pub fn auto_select(available: &[String]) -> String {
    for rule in PREFERENCE_RULES {
        if let Some(model) = available.iter().find(|name| (rule.matches)(name)) {
            return model.clone();
        }
    }
    FALLBACK_MODEL.to_string()
}

/// 規則の説明つきでモデル一覧を整形（modelsサブコマンド用）
pub fn describe_models(available: &[String]) -> Vec<String> {
    available
        .iter()
        .map(|name| {
            let label = PREFERENCE_RULES
                .iter()
                .find(|rule| (rule.matches)(name))
                .map(|rule| rule.label)
                .unwrap_or("優先対象外");
            format!("{} ({})", name, label)
        })
        .collect()
}

/// 対話式でモデルを選択
///
/// 一覧が空なら対話せずフォールバックを返す。
pub fn select_interactive(available: &[String]) -> String {
    if available.is_empty() {
        println!("⚠ 利用可能なモデルがありません。{} を使用します", FALLBACK_MODEL);
        return FALLBACK_MODEL.to_string();
    }

    let default = auto_select(available);
    let default_idx = available.iter().position(|m| *m == default).unwrap_or(0);

    match Select::new()
        .with_prompt("使用するモデルを選択")
        .items(available)
        .default(default_idx)
        .interact()
    {
        Ok(idx) => available[idx].clone(),
        Err(_) => {
            println!("⚠ 入力を読めませんでした。{} を使用します", default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auto_select_prefers_flash_latest() {
        let available = models(&[
            "gemini-1.5-pro",
            "gemini-1.5-flash",
            "gemini-1.5-flash-latest",
        ]);
        assert_eq!(auto_select(&available), "gemini-1.5-flash-latest");
    }

    #[test]
    fn test_auto_select_flash_over_pro() {
        let available = models(&["gemini-1.5-pro", "gemini-2.0-flash"]);
        assert_eq!(auto_select(&available), "gemini-2.0-flash");
    }

    #[test]
    fn test_auto_select_pro_when_no_flash() {
        let available = models(&["gemini-1.0-ultra", "gemini-1.5-pro"]);
        assert_eq!(auto_select(&available), "gemini-1.5-pro");
    }

    #[test]
    fn test_auto_select_fallback() {
        assert_eq!(auto_select(&[]), FALLBACK_MODEL);
        let available = models(&["gemini-embedding"]);
        assert_eq!(auto_select(&available), FALLBACK_MODEL);
    }

    #[test]
    fn test_auto_select_first_in_list_order_within_rule() {
        let available = models(&["gemini-a-flash", "gemini-b-flash"]);
        assert_eq!(auto_select(&available), "gemini-a-flash");
    }

    #[test]
    fn test_describe_models() {
        let available = models(&["gemini-1.5-flash-latest", "gemini-embedding"]);
        let described = describe_models(&available);
        assert!(described[0].contains("flash系の最新版"));
        assert!(described[1].contains("優先対象外"));
    }
}
