//! User profile - pacing personality, notification preferences and streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Profile of the tracked user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,

    /// Pacing personality, derived once at setup
    pub personality_type: PersonalityType,

    /// Effort curve: >1 back-loads effort, <1 front-loads, 1.0 neutral.
    /// Stored for future use; the adjustment engine does not consume it yet.
    pub pacing_multiplier: f32,

    /// Notification preferences
    pub notifications: NotificationPrefs,

    /// Consecutive daily-login count
    pub streak: u32,

    /// Last calendar day a session was opened
    pub last_login_date: Option<NaiveDate>,
}

/// Pacing personality, derived from the setup questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PersonalityType {
    /// Works at an even pace
    Steady,
    /// Front-loads effort
    Sprinter,
    /// Back-loads effort
    Procrastinator,
}

/// How the user answered the "how do you handle homework" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkStyle {
    /// Everything at the last minute
    LastMinute,
    /// Spread out evenly
    Even,
    /// Done as early as possible
    FrontLoad,
}

impl WorkStyle {
    /// Personality and pacing multiplier this style maps to.
    pub fn pacing(self) -> (PersonalityType, f32) {
        match self {
            WorkStyle::LastMinute => (PersonalityType::Procrastinator, 1.5),
            WorkStyle::Even => (PersonalityType::Steady, 1.0),
            WorkStyle::FrontLoad => (PersonalityType::Sprinter, 0.8),
        }
    }
}

/// Notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPrefs {
    /// Whether any notifications are delivered
    pub enabled: bool,

    /// Delivery channel
    pub method: NotificationMethod,

    /// Preferred delivery time, "HH:MM"
    pub time: String,
}

/// Notification delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationMethod {
    /// Browser push
    Browser,
    /// Transactional email
    Email,
    /// LINE message
    Line,
    /// No notifications
    None,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            enabled: false,
            method: NotificationMethod::None,
            time: "09:00".to_string(),
        }
    }
}

impl UserProfile {
    /// Build a profile from the setup questionnaire. Personality and
    /// pacing are derived here and never recomputed afterwards. The new
    /// profile starts with a streak of 1, logged in today.
    pub fn from_setup(
        name: impl Into<String>,
        style: WorkStyle,
        method: NotificationMethod,
        today: NaiveDate,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::Validation(
                "profile name must not be empty".to_string(),
            ));
        }
        let (personality_type, pacing_multiplier) = style.pacing();
        Ok(Self {
            name,
            personality_type,
            pacing_multiplier,
            notifications: NotificationPrefs {
                enabled: method != NotificationMethod::None,
                method,
                time: "09:00".to_string(),
            },
            streak: 1,
            last_login_date: Some(today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_last_minute_style_is_back_loaded() {
        let profile =
            UserProfile::from_setup("Taro", WorkStyle::LastMinute, NotificationMethod::None, today())
                .unwrap();
        assert_eq!(profile.personality_type, PersonalityType::Procrastinator);
        assert_eq!(profile.pacing_multiplier, 1.5);
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.last_login_date, Some(today()));
    }

    #[test]
    fn test_front_load_style_is_sprinter() {
        let profile =
            UserProfile::from_setup("Mei", WorkStyle::FrontLoad, NotificationMethod::Email, today())
                .unwrap();
        assert_eq!(profile.personality_type, PersonalityType::Sprinter);
        assert_eq!(profile.pacing_multiplier, 0.8);
        assert!(profile.notifications.enabled);
        assert_eq!(profile.notifications.method, NotificationMethod::Email);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err =
            UserProfile::from_setup("", WorkStyle::Even, NotificationMethod::None, today())
                .unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }
}
