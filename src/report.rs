use std::fmt::Write;

use anyhow::Context;

use crate::aggregate::round_half_up_div;
use crate::models::{ParticipantSummary, WeekSummary, WeeklyData};
use crate::week::WeekKey;

/// Week keys newest first, the order the week selector lists them in.
pub fn available_weeks(weekly: &WeeklyData) -> Vec<WeekKey> {
    weekly.keys().rev().copied().collect()
}

/// Newest week. The board opens on the latest data rather than the first
/// week ever recorded.
pub fn default_week(weekly: &WeeklyData) -> Option<WeekKey> {
    weekly.keys().next_back().copied()
}

/// Sum of every week's penalties.
pub fn prize_pool(weekly: &WeeklyData) -> u32 {
    weekly.values().map(|week| week.total_penalties).sum()
}

fn targets_met(summary: &WeekSummary) -> usize {
    summary.participants.iter().filter(|p| p.met_target()).count()
}

/// Mean completions per participant, halves rounded up; 0 for an empty week.
pub fn average_completed(summary: &WeekSummary) -> u32 {
    if summary.participants.is_empty() {
        return 0;
    }
    let total: u64 = summary
        .participants
        .iter()
        .map(|p| u64::from(p.completed))
        .sum();
    round_half_up_div(total, summary.participants.len() as u64)
}

/// Share of participants that met their target, as a rounded percentage.
pub fn success_rate(summary: &WeekSummary) -> u32 {
    if summary.participants.is_empty() {
        return 0;
    }
    round_half_up_div(
        100 * targets_met(summary) as u64,
        summary.participants.len() as u64,
    )
}

/// Everyone who took part met their target. Never true for an empty week.
pub fn is_perfect_week(summary: &WeekSummary) -> bool {
    !summary.participants.is_empty() && summary.participants.iter().all(|p| p.met_target())
}

pub fn top_performer(summary: &WeekSummary) -> Option<&ParticipantSummary> {
    summary.participants.first()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub participants: usize,
    pub targets_met: usize,
    pub week_penalties: u32,
    pub prize_pool: u32,
    pub average_completed: u32,
    pub success_rate: u32,
    pub perfect_week: bool,
}

impl BoardStats {
    pub fn for_week(summary: &WeekSummary, weekly: &WeeklyData) -> Self {
        Self {
            participants: summary.participants.len(),
            targets_met: targets_met(summary),
            week_penalties: summary.total_penalties,
            prize_pool: prize_pool(weekly),
            average_completed: average_completed(summary),
            success_rate: success_rate(summary),
            perfect_week: is_perfect_week(summary),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyTitles<'a> {
    pub champion: Option<&'a ParticipantSummary>,
    pub slow_walker: Option<&'a ParticipantSummary>,
    pub biggest_contributor: Option<&'a ParticipantSummary>,
}

/// Champion is rank 1. Slow walker and biggest contributor resolve ties to
/// the participant listed last on the leaderboard; the contributor is only
/// named when they actually owe something.
pub fn weekly_titles(summary: &WeekSummary) -> WeeklyTitles<'_> {
    let participants = &summary.participants;

    let champion = participants.iter().find(|p| p.rank == 1);
    let slow_walker = participants
        .iter()
        .reduce(|prev, current| if prev.completed < current.completed { prev } else { current });
    let biggest_contributor = participants
        .iter()
        .reduce(|prev, current| if prev.penalty > current.penalty { prev } else { current })
        .filter(|p| p.penalty > 0);

    WeeklyTitles {
        champion,
        slow_walker,
        biggest_contributor,
    }
}

pub fn build_report(week: WeekKey, summary: Option<&WeekSummary>, weekly: &WeeklyData) -> String {
    let empty = WeekSummary::default();
    let summary = summary.unwrap_or(&empty);
    let stats = BoardStats::for_week(summary, weekly);
    let titles = weekly_titles(summary);

    let mut output = String::new();

    let _ = writeln!(output, "# Weekly Challenge Report");
    match week.start_date() {
        Some(start) => {
            let _ = writeln!(output, "{} (starting {})", week.label(), start);
        }
        None => {
            let _ = writeln!(output, "{}", week.label());
        }
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Participants: {}", stats.participants);
    let _ = writeln!(output, "- Targets met: {}", stats.targets_met);
    let _ = writeln!(output, "- Total penalties: ${}", stats.week_penalties);
    let _ = writeln!(output, "- Prize pool: ${}", stats.prize_pool);
    let _ = writeln!(output, "- Average completion: {} problems", stats.average_completed);
    let _ = writeln!(
        output,
        "- Top performer: {}",
        top_performer(summary).map_or("N/A", |p| p.name.as_str())
    );
    let _ = writeln!(output, "- Success rate: {}%", stats.success_rate);
    if stats.perfect_week {
        let _ = writeln!(output);
        let _ = writeln!(output, "🎉 Perfect week! Everyone met their target, no penalties.");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Titles");
    if summary.participants.is_empty() {
        let _ = writeln!(output, "No completions recorded for this week.");
    } else {
        write_title(&mut output, "🏆 Champion", titles.champion, |p| {
            format!("{} problems", p.completed)
        });
        write_title(&mut output, "🐢 Slow Walker", titles.slow_walker, |p| {
            format!("{} problems", p.completed)
        });
        write_title(
            &mut output,
            "💰 Biggest Contributor",
            titles.biggest_contributor,
            |p| format!("${} penalty", p.penalty),
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Leaderboard");
    if summary.participants.is_empty() {
        let _ = writeln!(output, "No participants this week.");
    } else {
        let _ = writeln!(
            output,
            "| Rank | Participant | Completed | Target | Difference | Progress | Penalty | Status |"
        );
        let _ = writeln!(output, "|---|---|---|---|---|---|---|---|");
        for participant in summary.participants.iter() {
            let _ = writeln!(
                output,
                "| {} | {} {} | {} | {} | {:+} | {}% | ${} | {} |",
                participant.rank,
                participant.avatar,
                participant.name,
                participant.completed,
                participant.target,
                participant.difference,
                participant.completion_percentage,
                participant.penalty,
                participant.status_label()
            );
        }
    }

    output
}

fn write_title(
    output: &mut String,
    title: &str,
    participant: Option<&ParticipantSummary>,
    detail: impl Fn(&ParticipantSummary) -> String,
) {
    match participant {
        Some(p) => {
            let _ = writeln!(output, "- {}: {} {} ({})", title, p.avatar, p.name, detail(p));
        }
        None => {
            let _ = writeln!(output, "- {}: nobody yet", title);
        }
    }
}

/// Terminal leaderboard, one line per participant.
pub fn format_leaderboard(summary: &WeekSummary) -> String {
    let mut output = String::new();
    for participant in summary.participants.iter() {
        let _ = writeln!(
            output,
            "{:>2}. {} {:<12} {:>2}/{:<2} ({:>3}%) penalty ${} [{}]",
            participant.rank,
            participant.avatar,
            participant.name,
            participant.completed,
            participant.target,
            participant.completion_percentage,
            participant.penalty,
            participant.status_label()
        );
    }
    let _ = writeln!(output, "Total penalties: ${}", summary.total_penalties);
    let _ = writeln!(
        output,
        "Average completion: {} problems, success rate {}%",
        average_completed(summary),
        success_rate(summary)
    );
    if is_perfect_week(summary) {
        let _ = writeln!(output, "Perfect week!");
    }
    output
}

pub fn build_json(weekly: &WeeklyData) -> anyhow::Result<String> {
    serde_json::to_string_pretty(weekly).context("failed to serialize weekly data")
}
