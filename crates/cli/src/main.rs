//! Pacer CLI - adaptive goal-tracking sessions.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use pacer_core::{
    Difficulty, Goal, GoalCategory, GoalId, Milestone, MilestoneId, MilestoneStatus,
    NotificationMethod, Time, UserProfile, WorkStyle,
};
use pacer_i18n::{Catalog, Language};
use pacer_notify::{EmailPayload, HttpNotifier, Notifier};
use pacer_schedule::{
    complete, days_until, extend, find_current, sort_by_target_date, squeeze, track_streak,
};
use pacer_storage::{GoalRepository, JsonStore, ProfileRepository};
use tracing::warn;

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "Adaptive goal tracking", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, global = true, default_value = ".pacer")]
    root: std::path::PathBuf,

    /// User the session belongs to
    #[arg(long, global = true, default_value = "default")]
    user: String,

    /// Display language (en or ja)
    #[arg(long, global = true, default_value = "en")]
    lang: Language,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the setup questionnaire and create a profile
    Setup {
        /// Display name
        #[arg(long)]
        name: String,
        /// How you handle deadlines: last-minute, even or front-load
        #[arg(long, default_value = "even")]
        style: String,
        /// Notification method: browser, email, line or none
        #[arg(long, default_value = "none")]
        notify: String,
    },
    /// Create a new goal
    New {
        /// Goal title
        #[arg(long)]
        title: String,
        /// Category: work, study, hobby, health, finance or other
        #[arg(long, default_value = "other")]
        category: String,
        /// Detailed description
        #[arg(long, default_value = "")]
        description: String,
        /// Start date, yyyy-mm-dd (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Deadline, yyyy-mm-dd
        #[arg(long)]
        deadline: NaiveDate,
    },
    /// Add a milestone to the current goal
    Add {
        /// Milestone title
        #[arg(long)]
        title: String,
        /// Target date, yyyy-mm-dd
        #[arg(long)]
        date: NaiveDate,
        /// Difficulty: micro, small, medium or large
        #[arg(long, default_value = "medium")]
        difficulty: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a milestone from the current goal
    Remove {
        /// Milestone id
        id: String,
    },
    /// Show the timeline and today's focus
    Show,
    /// Mark a milestone complete
    Complete {
        /// Milestone id
        id: String,
    },
    /// Push the remaining schedule and the deadline forward
    Extend {
        /// Milestone id of the late trigger
        id: String,
    },
    /// Raise the effort on a late milestone instead of moving dates
    Squeeze {
        /// Milestone id of the late trigger
        id: String,
    },
    /// Send an update email for the current goal
    Notify {
        /// Recipient address
        #[arg(long)]
        email: String,
        /// Message body (defaults to the stock encouragement)
        #[arg(long)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::new(cli.lang);
    let store = JsonStore::new(&cli.root).await?;

    // Session preamble: recompute the daily streak before anything else.
    // Guarded inside the tracker to at most one change per calendar day.
    if !matches!(cli.command, Commands::Setup { .. }) {
        refresh_streak(&store, &cli.user).await;
    }

    match cli.command {
        Commands::Setup { name, style, notify } => {
            let today = Utc::now().date_naive();
            let profile =
                UserProfile::from_setup(name, parse_style(&style)?, parse_method(&notify)?, today)?;
            store.save_profile(&cli.user, &profile).await?;
            println!(
                "Profile created for {} ({:?}, pacing x{})",
                profile.name, profile.personality_type, profile.pacing_multiplier
            );
        }
        Commands::New { title, category, description, start, deadline } => {
            let start = start.unwrap_or_else(|| Utc::now().date_naive());
            let goal = Goal::new(
                GoalId::temp(Utc::now().timestamp_millis()),
                title,
                description,
                parse_category(&category)?,
                day_start(start),
                day_start(deadline),
            )?;
            let saved = store.save_goal(&cli.user, &goal).await?;
            println!("Created goal {} - {}", saved.id, saved.title);
        }
        Commands::Add { title, date, difficulty, description } => {
            let mut goal = load_goal(&store, &cli.user).await?;
            let mut milestone = Milestone::new(
                MilestoneId::temp(Utc::now().timestamp_millis()),
                title,
                day_start(date),
                parse_difficulty(&difficulty)?,
            )?;
            if let Some(text) = description {
                milestone = milestone.with_description(text);
            }
            goal.add_milestone(milestone);
            let saved = store.save_goal(&cli.user, &goal).await?;
            let added = saved.milestones.last().map(|m| m.id.to_string()).unwrap_or_default();
            println!("Added milestone {added}");
        }
        Commands::Remove { id } => {
            let mut goal = load_goal(&store, &cli.user).await?;
            let removed = goal.remove_milestone(&MilestoneId::from(id.as_str()))?;
            store.save_goal(&cli.user, &goal).await?;
            println!("Removed milestone {} - {}", removed.id, removed.title);
        }
        Commands::Show => {
            let goal = load_goal(&store, &cli.user).await?;
            print_dashboard(&goal, &store, &cli.user, &catalog).await;
        }
        Commands::Complete { id } => {
            let goal = load_goal(&store, &cli.user).await?;
            let updated = complete(&goal, &MilestoneId::from(id.as_str()), Utc::now())?;
            let saved = store.save_goal(&cli.user, &updated).await?;
            println!(
                "{}: {}%",
                catalog.translate("dashboard.total_progress"),
                saved.progress
            );
        }
        Commands::Extend { id } => {
            let goal = load_goal(&store, &cli.user).await?;
            let updated = extend(&goal, &MilestoneId::from(id.as_str()))?;
            let saved = store.save_goal(&cli.user, &updated).await?;
            println!(
                "{}: {}",
                catalog.translate("dashboard.deadline"),
                saved.deadline.date_naive()
            );
        }
        Commands::Squeeze { id } => {
            let goal = load_goal(&store, &cli.user).await?;
            let annotation = catalog.translate("adjust.intensified");
            let updated = squeeze(&goal, &MilestoneId::from(id.as_str()), annotation)?;
            store.save_goal(&cli.user, &updated).await?;
            println!("Milestone intensified.");
        }
        Commands::Notify { email, message } => {
            let profile = store
                .load_profile(&cli.user)
                .await?
                .ok_or_else(|| anyhow!("no profile yet - run `pacer setup` first"))?;
            let goal = load_goal(&store, &cli.user).await?;
            let message =
                message.unwrap_or_else(|| catalog.translate("notify.default_message").to_string());

            let endpoint = std::env::var("PACER_EMAIL_ENDPOINT")
                .context("PACER_EMAIL_ENDPOINT is not set")?;
            let api_key = std::env::var("PACER_EMAIL_API_KEY").unwrap_or_default();
            let notifier = HttpNotifier::new(endpoint, api_key);

            let payload = EmailPayload::for_goal(&profile, &goal, email, message);
            notifier.send_update(&payload).await?;
            println!("Update sent to {}", payload.email);
        }
    }

    Ok(())
}

/// Load the profile and fold today into the streak, persisting only when
/// something changed. Streak persistence failures are logged and the
/// session continues with the stale value.
async fn refresh_streak(store: &JsonStore, user: &str) {
    let today = Utc::now().date_naive();
    match store.load_profile(user).await {
        Ok(Some(mut profile)) => {
            if track_streak(&mut profile, today) {
                if let Err(err) = store.update_streak(user, profile.streak, today).await {
                    warn!("failed to persist streak: {err}");
                }
            }
        }
        Ok(None) => {}
        Err(err) => warn!("failed to load profile: {err}"),
    }
}

async fn load_goal(store: &JsonStore, user: &str) -> Result<Goal> {
    store
        .load_latest_goal(user)
        .await?
        .ok_or_else(|| anyhow!("no goal yet - create one with `pacer new`"))
}

async fn print_dashboard(goal: &Goal, store: &JsonStore, user: &str, catalog: &Catalog) {
    let now = Utc::now();
    println!("{} [{}]", goal.title, goal.category);
    if !goal.description.is_empty() {
        println!("{}", goal.description);
    }
    println!(
        "{}: {}%  |  {}: {}  |  {}: {}",
        catalog.translate("dashboard.total_progress"),
        goal.progress,
        catalog.translate("dashboard.deadline"),
        goal.deadline.date_naive(),
        catalog.translate("dashboard.days_left"),
        days_until(goal.deadline, now),
    );

    if let Ok(Some(profile)) = store.load_profile(user).await {
        println!(
            "{}: {} {}",
            catalog.translate("app.streak"),
            profile.streak,
            catalog.translate("app.days")
        );
    }

    println!();
    println!("{}:", catalog.translate("dashboard.your_journey"));
    for milestone in sort_by_target_date(&goal.milestones) {
        let marker = status_marker(milestone.status());
        let late = if milestone.is_late(now) {
            format!(" [{}]", catalog.translate("timeline.late"))
        } else {
            String::new()
        };
        println!(
            "  {marker} {}  {} ({}){late}",
            milestone.target_date.date_naive(),
            milestone.title,
            catalog.translate(&format!("timeline.difficulty.{}", milestone.difficulty.as_str())),
        );
        println!("      id: {}", milestone.id);
    }

    println!();
    match find_current(&goal.milestones) {
        Some(current) => println!(
            "{}: {}",
            catalog.translate("dashboard.todays_micro_goal"),
            current.title
        ),
        None => println!("{}", catalog.translate("dashboard.all_caught_up")),
    }
}

fn status_marker(status: MilestoneStatus) -> &'static str {
    match status {
        MilestoneStatus::Pending => "[ ]",
        MilestoneStatus::Completed => "[x]",
        MilestoneStatus::Missed => "[!]",
        MilestoneStatus::Adjusted => "[~]",
    }
}

fn day_start(date: NaiveDate) -> Time {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn parse_style(s: &str) -> Result<WorkStyle> {
    match s {
        "last-minute" => Ok(WorkStyle::LastMinute),
        "even" => Ok(WorkStyle::Even),
        "front-load" => Ok(WorkStyle::FrontLoad),
        other => bail!("unknown work style: {other} (expected last-minute, even or front-load)"),
    }
}

fn parse_method(s: &str) -> Result<NotificationMethod> {
    match s {
        "browser" => Ok(NotificationMethod::Browser),
        "email" => Ok(NotificationMethod::Email),
        "line" => Ok(NotificationMethod::Line),
        "none" => Ok(NotificationMethod::None),
        other => bail!("unknown notification method: {other}"),
    }
}

fn parse_category(s: &str) -> Result<GoalCategory> {
    match s.to_lowercase().as_str() {
        "work" => Ok(GoalCategory::Work),
        "study" => Ok(GoalCategory::Study),
        "hobby" => Ok(GoalCategory::Hobby),
        "health" => Ok(GoalCategory::Health),
        "finance" => Ok(GoalCategory::Finance),
        "other" => Ok(GoalCategory::Other),
        other => bail!("unknown category: {other}"),
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    match s {
        "micro" => Ok(Difficulty::Micro),
        "small" => Ok(Difficulty::Small),
        "medium" => Ok(Difficulty::Medium),
        "large" => Ok(Difficulty::Large),
        other => bail!("unknown difficulty: {other}"),
    }
}
