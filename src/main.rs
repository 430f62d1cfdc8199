use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use nba_impact::dataset::{self, Dataset, Statistic, player_names};
use nba_impact::leaderboard::{DEFAULT_LEADERBOARD_SIZE, top_k};
use nba_impact::profile::{NormalizationParams, PROFILE_STATS, headline, profile_of};
use nba_impact::quadrants::{self, Quadrant};
use nba_impact::report_export;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Options::parse(std::env::args().skip(1))?;

    let loaded;
    let data: &Dataset = match &opts.data_path {
        Some(path) => {
            loaded = Dataset::load(path)
                .with_context(|| format!("load player data from {}", path.display()))?;
            &loaded
        }
        None => dataset::dataset().context("load player data")?,
    };

    let stat = opts.stat.unwrap_or(Statistic::Points);

    if opts.json {
        print_json(data, &opts, stat)?;
    } else {
        print_report(data, &opts, stat)?;
    }

    if let Some(path) = &opts.export_path {
        let report = report_export::export_report(path, data, opts.team.as_deref())?;
        println!();
        println!("Workbook written to {}", path.display());
        println!(
            "Players: {}  Leader rows: {}  Quadrant rows: {}  Profile rows: {}",
            report.players, report.leader_rows, report.quadrant_rows, report.profile_rows
        );
    }

    Ok(())
}

#[derive(Debug, Default)]
struct Options {
    team: Option<String>,
    stat: Option<Statistic>,
    player: Option<String>,
    export_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
    json: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut opts = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--team" => opts.team = Some(expect_value(&mut args, "--team")?),
                "--stat" => {
                    let raw = expect_value(&mut args, "--stat")?;
                    let stat = Statistic::from_key(&raw).ok_or_else(|| {
                        anyhow!(
                            "unknown statistic {raw:?}; expected one of \
                             games/minutes/points/rebounds/assists/steals/blocks/attempts/efg"
                        )
                    })?;
                    opts.stat = Some(stat);
                }
                "--player" => opts.player = Some(expect_value(&mut args, "--player")?),
                "--export" => {
                    opts.export_path = Some(PathBuf::from(expect_value(&mut args, "--export")?));
                }
                "--data" => {
                    opts.data_path = Some(PathBuf::from(expect_value(&mut args, "--data")?));
                }
                "--json" => opts.json = true,
                other => {
                    return Err(anyhow!(
                        "unknown argument {other:?}; expected \
                         --team/--stat/--player/--export/--data/--json"
                    ));
                }
            }
        }
        Ok(opts)
    }
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn print_report(data: &Dataset, opts: &Options, stat: Statistic) -> Result<()> {
    let team = opts.team.as_deref();
    let subset = data.filter_by_team(team);
    let scope = team.unwrap_or("All teams");

    println!("Teams: {}", data.teams().join(", "));

    println!();
    println!(
        "Top {} by {} ({scope})",
        DEFAULT_LEADERBOARD_SIZE,
        stat.label()
    );
    let board = top_k(&subset, stat, DEFAULT_LEADERBOARD_SIZE);
    if board.is_empty() {
        println!("  no players match the current filter");
    }
    for (idx, record) in board.iter().enumerate() {
        println!(
            "  {:>2}. {:<26} {:<24} {:>7.1}",
            idx + 1,
            record.name,
            record.team,
            stat.value(record)
        );
    }

    println!();
    println!("Efficiency vs volume ({scope})");
    match quadrants::classify(&subset) {
        Some(analysis) => {
            println!(
                "  medians: {:.1} attempts, {:.3} eFG",
                analysis.median_volume, analysis.median_efficiency
            );
            for (quadrant, count) in Quadrant::ALL.iter().zip(analysis.counts()) {
                println!("  {:<12} {count}", quadrant.label());
            }
            for entry in &analysis.entries {
                println!(
                    "  {:<26} {:>6.1} att  {:.3} eFG  {}",
                    entry.record.name,
                    entry.record.attempts,
                    entry.record.efg,
                    entry.quadrant.label()
                );
            }
        }
        None => println!("  not enough qualifying players to classify"),
    }

    if let Some(name) = &opts.player {
        let record = data.find_player(name)?;
        let summary = headline(record);
        let params = NormalizationParams::fit(data);
        let profile = profile_of(&params, record);

        println!();
        println!("Profile: {} ({})", record.name, record.team);
        println!(
            "  {:.1} pts  {:.1} reb  {:.1} ast  {:.3} eFG",
            summary.points, summary.rebounds, summary.assists, summary.efg
        );
        for (axis, value) in PROFILE_STATS.iter().zip(&profile) {
            println!("  {:<20} {value:.3}", axis.label());
        }
        let closed: Vec<String> = profile.iter().map(|v| format!("{v:.3}")).collect();
        println!("  closed vector: [{}]", closed.join(", "));
    }

    Ok(())
}

/// One structural document with every derived view, for consumers that
/// render charts from the numbers.
fn print_json(data: &Dataset, opts: &Options, stat: Statistic) -> Result<()> {
    let team = opts.team.as_deref();
    let subset = data.filter_by_team(team);
    let board = top_k(&subset, stat, DEFAULT_LEADERBOARD_SIZE);

    let profile_doc = match &opts.player {
        Some(name) => {
            let record = data.find_player(name)?;
            let params = NormalizationParams::fit(data);
            Some(json!({
                "player": record.name,
                "team": record.team,
                "headline": headline(record),
                "axes": PROFILE_STATS.iter().map(|s| s.label()).collect::<Vec<_>>(),
                "values": profile_of(&params, record),
            }))
        }
        None => None,
    };

    let doc = json!({
        "teams": data.teams(),
        "team_filter": team,
        "players": player_names(&subset),
        "leaderboard": {
            "statistic": stat.label(),
            "entries": board,
        },
        "quadrants": quadrants::classify(&subset),
        "profile": profile_doc,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
