//! Daily login streak tracking.

use chrono::NaiveDate;
use pacer_core::UserProfile;
use tracing::debug;

/// Recompute the login streak for `today`.
///
/// Runs once per session load; the `last_login_date == today` check makes
/// repeat calls within a calendar day no-ops. Returns whether the profile
/// changed, so callers know to persist it.
///
/// A gap of exactly one day continues the streak, a longer gap resets it
/// to 1. A missing last-login date counts as "today", which only floors a
/// zero streak to 1.
pub fn track_streak(profile: &mut UserProfile, today: NaiveDate) -> bool {
    if profile.last_login_date == Some(today) {
        return false;
    }

    let last_login = profile.last_login_date.unwrap_or(today);
    let diff = (today - last_login).num_days();

    if diff == 1 {
        profile.streak += 1;
    } else if diff > 1 {
        profile.streak = 1;
    } else if profile.streak == 0 {
        profile.streak = 1;
    }

    profile.last_login_date = Some(today);
    debug!("streak recomputed: {} day(s)", profile.streak);
    true
}
