//! 戦場区分・時期の選択肢
//!
//! 出力ファイル名と表示にのみ使う固定の列挙。集計ロジックには影響しない。

use dialoguer::Select;

/// 戦場区分と所属する戦場名
pub const EVENT_STRUCTURE: &[(&str, &[&str])] = &[
    (
        "討伐戦",
        &["秦国討伐戦", "趙国討伐戦", "魏国討伐戦", "合従軍討伐戦"],
    ),
    ("争覇戦", &["争覇戦①", "争覇戦②", "争覇戦③"]),
    ("大同盟戦", &["大同盟戦①", "大同盟戦②"]),
];

/// 時期（1月〜12月）
pub fn months() -> Vec<String> {
    (1..=12).map(|i| format!("{}月", i)).collect()
}

/// 出力ファイル名を組み立てる
pub fn output_file_name(month: &str, event: &str) -> String {
    format!("{}_{}_戦功表.xlsx", month, event)
}

/// 戦場名が列挙に含まれるか確認し、区分名を返す
pub fn category_of(event: &str) -> Option<&'static str> {
    EVENT_STRUCTURE
        .iter()
        .find(|(_, events)| events.contains(&event))
        .map(|(category, _)| *category)
}

/// 対話式で時期と戦場を選択
///
/// (月, 戦場名) を返す。入力が読めない場合は先頭の選択肢に倒す。
pub fn select_interactive() -> (String, String) {
    let month_items = months();
    let month_idx = Select::new()
        .with_prompt("時期を選択")
        .items(&month_items)
        .default(0)
        .interact()
        .unwrap_or(0);

    let categories: Vec<&str> = EVENT_STRUCTURE.iter().map(|(c, _)| *c).collect();
    let category_idx = Select::new()
        .with_prompt("戦場区分を選択")
        .items(&categories)
        .default(0)
        .interact()
        .unwrap_or(0);

    let events = EVENT_STRUCTURE[category_idx].1;
    let event_idx = Select::new()
        .with_prompt("戦場名を選択")
        .items(events)
        .default(0)
        .interact()
        .unwrap_or(0);

    (month_items[month_idx].clone(), events[event_idx].to_string())
}
