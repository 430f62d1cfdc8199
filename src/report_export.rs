//! Spreadsheet export of the derived analytical views.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dataset::{Dataset, PlayerRecord};
use crate::leaderboard::{DEFAULT_LEADERBOARD_SIZE, LEADERBOARD_STATS, top_k};
use crate::profile::{NormalizationParams, PROFILE_STATS, profile_of};
use crate::quadrants;

pub struct ExportReport {
    pub players: usize,
    pub leader_rows: usize,
    pub quadrant_rows: usize,
    pub profile_rows: usize,
}

/// Write a workbook with the derived views for `team` (or the full store
/// when `None`): the canonical player table, the top-10 board for every
/// selectable statistic, the quadrant classification with its median
/// splits, and the closed normalized profile per player. Normalization is
/// always fitted on the full dataset.
pub fn export_report(path: &Path, dataset: &Dataset, team: Option<&str>) -> Result<ExportReport> {
    let subset = dataset.filter_by_team(team);
    let params = NormalizationParams::fit(dataset);

    let summary_rows = vec![
        vec!["Generated".to_string(), Utc::now().to_rfc3339()],
        vec![
            "Team Filter".to_string(),
            team.unwrap_or("All").to_string(),
        ],
        vec!["Players".to_string(), subset.len().to_string()],
        vec![
            "Population".to_string(),
            dataset.players().len().to_string(),
        ],
    ];

    let mut players_rows = vec![vec![
        "Player".to_string(),
        "Position".to_string(),
        "Team".to_string(),
        "Games".to_string(),
        "Minutes".to_string(),
        "Points".to_string(),
        "Rebounds".to_string(),
        "Assists".to_string(),
        "Steals".to_string(),
        "Blocks".to_string(),
        "FG Attempts".to_string(),
        "Effective FG%".to_string(),
    ]];
    for record in &subset {
        players_rows.push(player_row(record));
    }

    let mut leaders_rows = vec![vec![
        "Statistic".to_string(),
        "Rank".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Value".to_string(),
    ]];
    for stat in LEADERBOARD_STATS {
        for (idx, record) in top_k(&subset, stat, DEFAULT_LEADERBOARD_SIZE)
            .iter()
            .enumerate()
        {
            leaders_rows.push(vec![
                stat.label().to_string(),
                (idx + 1).to_string(),
                record.name.clone(),
                record.team.clone(),
                format!("{:.1}", stat.value(record)),
            ]);
        }
    }

    let mut quadrant_rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Position".to_string(),
        "FG Attempts".to_string(),
        "Effective FG%".to_string(),
        "Quadrant".to_string(),
    ]];
    match quadrants::classify(&subset) {
        Some(analysis) => {
            for entry in &analysis.entries {
                quadrant_rows.push(vec![
                    entry.record.name.clone(),
                    entry.record.team.clone(),
                    entry.record.position.label().to_string(),
                    format!("{:.1}", entry.record.attempts),
                    format!("{:.3}", entry.record.efg),
                    entry.quadrant.label().to_string(),
                ]);
            }
            quadrant_rows.push(vec![
                "Median".to_string(),
                String::new(),
                String::new(),
                format!("{:.1}", analysis.median_volume),
                format!("{:.3}", analysis.median_efficiency),
                String::new(),
            ]);
        }
        None => {
            quadrant_rows.push(vec!["Insufficient data".to_string()]);
        }
    }

    let mut profiles_header = vec!["Player".to_string(), "Team".to_string()];
    profiles_header.extend(PROFILE_STATS.iter().map(|s| s.label().to_string()));
    profiles_header.push("Close".to_string());
    let mut profiles_rows = vec![profiles_header];
    for record in &subset {
        let mut row = vec![record.name.clone(), record.team.clone()];
        row.extend(
            profile_of(&params, record)
                .iter()
                .map(|v| format!("{v:.3}")),
        );
        profiles_rows.push(row);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_rows(sheet, &players_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Leaders")?;
        write_rows(sheet, &leaders_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Quadrants")?;
        write_rows(sheet, &quadrant_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Profiles")?;
        write_rows(sheet, &profiles_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: players_rows.len().saturating_sub(1),
        leader_rows: leaders_rows.len().saturating_sub(1),
        quadrant_rows: quadrant_rows.len().saturating_sub(1),
        profile_rows: profiles_rows.len().saturating_sub(1),
    })
}

fn player_row(record: &PlayerRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.position.label().to_string(),
        record.team.clone(),
        record.games.to_string(),
        format!("{:.1}", record.minutes),
        format!("{:.1}", record.points),
        format!("{:.1}", record.rebounds),
        format!("{:.1}", record.assists),
        format!("{:.1}", record.steals),
        format!("{:.1}", record.blocks),
        format!("{:.1}", record.attempts),
        format!("{:.3}", record.efg),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
