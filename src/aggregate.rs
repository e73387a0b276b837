use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::{BoardConfig, TieBreak};
use crate::error::BoardError;
use crate::models::{CompletionRecord, ParticipantSummary, WeekSummary, WeeklyData};
use crate::week::WeekKey;

/// Groups records into weeks and ranks each week's participants.
///
/// Fails before producing anything if the config is invalid or any record
/// has a blank person name. Empty input yields an empty map.
pub fn aggregate_weeks(
    records: &[CompletionRecord],
    config: &BoardConfig,
) -> Result<WeeklyData, BoardError> {
    config.validate()?;

    if let Some(record) = records.iter().find(|r| r.person.trim().is_empty()) {
        return Err(BoardError::EmptyPerson {
            id: record.problem_id.clone(),
        });
    }

    let mut by_week: BTreeMap<WeekKey, Vec<&CompletionRecord>> = BTreeMap::new();
    for record in records {
        by_week.entry(record.week_key()).or_default().push(record);
    }

    let mut weekly = WeeklyData::new();
    for (key, week_records) in by_week {
        let summary = summarize_week(&week_records, config);
        debug!(
            week = %key,
            records = week_records.len(),
            participants = summary.participants.len(),
            total_penalties = summary.total_penalties,
            "aggregated week"
        );
        weekly.insert(key, summary);
    }

    Ok(weekly)
}

fn summarize_week(records: &[&CompletionRecord], config: &BoardConfig) -> WeekSummary {
    let target = config.weekly_target;

    let mut participants: Vec<ParticipantSummary> = tally_in_order(records)
        .into_iter()
        .enumerate()
        .map(|(position, (name, completed))| ParticipantSummary {
            name: name.to_string(),
            completed,
            target,
            difference: i64::from(completed) - i64::from(target),
            penalty: penalty(completed, target),
            rank: 0,
            avatar: config.avatars[position % config.avatars.len()].clone(),
            completion_percentage: completion_percentage(completed, target),
        })
        .collect();

    // Both sorts are stable, so FirstAppearance keeps tally order for ties.
    match config.tie_break {
        TieBreak::FirstAppearance => {
            participants.sort_by(|a, b| b.completed.cmp(&a.completed));
        }
        TieBreak::Alphabetical => {
            participants.sort_by(|a, b| {
                b.completed
                    .cmp(&a.completed)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }

    for (index, participant) in participants.iter_mut().enumerate() {
        participant.rank = index + 1;
    }

    let total_penalties = participants.iter().map(|p| p.penalty).sum();

    WeekSummary {
        participants,
        total_penalties,
    }
}

/// Counts records per exact person name, in order of first appearance.
fn tally_in_order<'a>(records: &[&'a CompletionRecord]) -> Vec<(&'a str, u32)> {
    let mut order: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let name = record.person.as_str();
        match index.get(name) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(name, order.len());
                order.push((name, 1));
            }
        }
    }

    order
}

pub fn penalty(completed: u32, target: u32) -> u32 {
    target.saturating_sub(completed)
}

/// `round(100 * completed / target)`, halves rounded up. `target` must be non-zero.
pub fn completion_percentage(completed: u32, target: u32) -> u32 {
    round_half_up_div(100 * u64::from(completed), u64::from(target))
}

/// `round(numerator / denominator)` with halves rounded up. `denominator` must be non-zero.
pub fn round_half_up_div(numerator: u64, denominator: u64) -> u32 {
    let rounded = (2 * numerator + denominator) / (2 * denominator);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
