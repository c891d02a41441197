//! Locale/translation collaborator.
//!
//! Fixed user-facing strings are looked up here by dotted key so that the
//! scheduling engine never hardcodes them (the squeeze annotation in
//! particular travels through this crate).

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Japanese
    Ja,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// String catalog for one language.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    /// Catalog for the given language.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// The language this catalog serves.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Look up a dotted key. Unknown keys fall back through English and
    /// then to the key itself, so a missing entry never panics a
    /// rendering path.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        let entry = match self.language {
            Language::En => translate_en(key),
            Language::Ja => translate_ja(key).or_else(|| translate_en(key)),
        };
        match entry {
            Some(text) => text,
            None => key,
        }
    }
}

fn translate_en(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "Pacer",
        "app.streak" => "Streak",
        "app.days" => "days",
        "dashboard.total_progress" => "Total Progress",
        "dashboard.deadline" => "Deadline",
        "dashboard.days_left" => "Days Left",
        "dashboard.daily_focus" => "Daily Focus",
        "dashboard.todays_micro_goal" => "Today's Micro Goal",
        "dashboard.all_caught_up" => "All caught up!",
        "dashboard.your_journey" => "Your Journey",
        "timeline.status.pending" => "Pending",
        "timeline.status.completed" => "Completed",
        "timeline.status.missed" => "Missed",
        "timeline.status.adjusted" => "Adjusted",
        "timeline.late" => "Late",
        "timeline.difficulty.micro" => "Micro",
        "timeline.difficulty.small" => "Small",
        "timeline.difficulty.medium" => "Medium",
        "timeline.difficulty.large" => "Large",
        "adjust.intensified" => "(INTENSIFIED: Schedule compressed!)",
        "notify.default_message" => "You're doing great! Keep pushing forward.",
        _ => return None,
    };
    Some(text)
}

fn translate_ja(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "Pacer",
        "app.streak" => "継続記録",
        "app.days" => "日",
        "dashboard.total_progress" => "全体の進捗",
        "dashboard.deadline" => "締め切り",
        "dashboard.days_left" => "残り日数",
        "dashboard.daily_focus" => "今日のフォーカス",
        "dashboard.todays_micro_goal" => "今日のマイクロゴール",
        "dashboard.all_caught_up" => "すべて完了！",
        "dashboard.your_journey" => "あなたの道のり",
        "timeline.status.pending" => "未完了",
        "timeline.status.completed" => "完了",
        "timeline.status.missed" => "未達成",
        "timeline.status.adjusted" => "調整済み",
        "timeline.late" => "遅れ",
        "timeline.difficulty.micro" => "ミクロ",
        "timeline.difficulty.small" => "小",
        "timeline.difficulty.medium" => "中",
        "timeline.difficulty.large" => "大",
        "adjust.intensified" => "【強化】スケジュール圧縮！",
        "notify.default_message" => "いい調子です！この調子で進みましょう。",
        _ => return None,
    };
    Some(text)
}
