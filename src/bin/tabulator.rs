//! Command-line front end: reads teams and results from files, runs one
//! computation and writes the result to stdout or a file.

use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tabulator::{
    config::{Config, init_tracing},
    tournaments::{
        config::{PairingMethod, SpeakerAwardsConfig, SpeaksAggregation},
        participants::{JudgeProfile, Room},
        rounds::{
            draws::{
                Draw,
                drawalgs::{DrawInput, elim, swiss},
                print as draw_print,
            },
            results::{
                ResultSet, TeamResult, speaker_scores_from_csv,
                team_results_from_csv,
            },
        },
        standings::{
            breaks::{breaking_teams, seed_break},
            compute::TeamStandings,
            export::{
                Tabular, delimited, json::JsonExport, print, spreadsheet,
            },
            speakers::SpeakerStandings,
        },
        teams::{SeededTeam, TeamRecord},
    },
};

#[derive(Parser)]
#[command(version, about = "Draws and tabs for debate tournaments")]
struct Cli {
    /// TOML file with tournament settings. Flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log more (repeat for more detail). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draws the next preliminary round.
    Swiss {
        /// JSON array of team records. Defaults to the standings computed
        /// from the results.
        #[arg(long)]
        teams: Option<PathBuf>,
        #[command(flatten)]
        results: ResultsArgs,
        #[command(flatten)]
        allocation: AllocationArgs,
        #[arg(long)]
        method: Option<PairingMethod>,
        /// Seed for the `random` method.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = DrawFormat::Json)]
        format: DrawFormat,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Draws the first round of an elimination bracket.
    Elim {
        /// JSON array of seeded teams. Defaults to seeding the break from
        /// the results.
        #[arg(long)]
        seeds: Option<PathBuf>,
        #[command(flatten)]
        results: ResultsArgs,
        #[command(flatten)]
        allocation: AllocationArgs,
        #[arg(long)]
        break_size: Option<usize>,
        #[arg(long, value_enum, default_value_t = DrawFormat::Json)]
        format: DrawFormat,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Ranks the teams.
    Standings {
        #[command(flatten)]
        results: ResultsArgs,
        #[arg(long)]
        speaks: Option<SpeaksAggregation>,
        #[arg(long)]
        division: Option<String>,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Ranks individual speakers.
    Speakers {
        #[command(flatten)]
        results: ResultsArgs,
        #[arg(long)]
        division: Option<String>,
        #[arg(long)]
        drop_high: Option<usize>,
        #[arg(long)]
        drop_low: Option<usize>,
        #[arg(long)]
        top: Option<usize>,
        /// Leave out speakers whose team breaks.
        #[arg(long)]
        exclude_breaking: bool,
        #[arg(long)]
        break_size: Option<usize>,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Lists the breaking teams with their seeds.
    Break {
        #[command(flatten)]
        results: ResultsArgs,
        #[arg(long)]
        size: Option<usize>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ResultsArgs {
    /// JSON array of tagged result records.
    #[arg(long)]
    results: Option<PathBuf>,
    /// CSV table of team results.
    #[arg(long)]
    team_csv: Option<PathBuf>,
    /// CSV table of speaker scores.
    #[arg(long)]
    speaker_csv: Option<PathBuf>,
}

#[derive(Args)]
struct AllocationArgs {
    /// JSON array of judges, sorted by `position` before allocation.
    #[arg(long)]
    judges: Option<PathBuf>,
    /// JSON array of rooms, allocated in order.
    #[arg(long)]
    rooms: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Where to write the output. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
    Xlsx,
    Html,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum DrawFormat {
    Json,
    Html,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse {}", path.display()))
}

impl ResultsArgs {
    fn load(&self) -> Result<ResultSet> {
        let mut set = match &self.results {
            Some(path) => {
                let file = File::open(path).with_context(|| {
                    format!("could not open {}", path.display())
                })?;
                ResultSet::from_json_reader(BufReader::new(file))
                    .with_context(|| format!("in {}", path.display()))?
            }
            None => ResultSet::default(),
        };

        if let Some(path) = &self.team_csv {
            let file = File::open(path)
                .with_context(|| format!("could not open {}", path.display()))?;
            set.team_results.extend(
                team_results_from_csv(BufReader::new(file))
                    .with_context(|| format!("in {}", path.display()))?,
            );
        }
        if let Some(path) = &self.speaker_csv {
            let file = File::open(path)
                .with_context(|| format!("could not open {}", path.display()))?;
            set.speaker_scores.extend(
                speaker_scores_from_csv(BufReader::new(file))
                    .with_context(|| format!("in {}", path.display()))?,
            );
        }

        Ok(set)
    }
}

impl AllocationArgs {
    fn load(&self) -> Result<(Vec<JudgeProfile>, Vec<Room>)> {
        let judges: Vec<JudgeProfile> = match &self.judges {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        let rooms = match &self.rooms {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        Ok((JudgeProfile::in_assignment_order(&judges), rooms))
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("could not write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn export<T: Tabular + JsonExport>(
    table: &T,
    title: &str,
    args: &ExportArgs,
) -> Result<()> {
    let bytes = match args.format {
        Format::Csv => delimited::to_string(table)?.into_bytes(),
        Format::Json => table.to_json(Utc::now())?.into_bytes(),
        Format::Xlsx => spreadsheet::to_bytes(table)?,
        Format::Html => print::to_html(table, title).into_bytes(),
    };
    write_output(args.output.as_deref(), &bytes)
}

fn write_draw(
    draw: &Draw,
    title: &str,
    format: DrawFormat,
    output: Option<&Path>,
) -> Result<()> {
    let text = match format {
        DrawFormat::Json => serde_json::to_string_pretty(draw)?,
        DrawFormat::Html => draw_print::to_html(draw, title),
    };
    write_output(output, text.as_bytes())
}

fn override_pairing(
    config: &mut Config,
    method: Option<PairingMethod>,
    seed: Option<u64>,
) {
    if let Some(method) = method {
        config.pairing.method = method;
    }
    if seed.is_some() {
        config.pairing.seed = seed;
    }
}

fn override_standings(
    config: &mut Config,
    speaks: Option<SpeaksAggregation>,
    division: Option<String>,
) {
    if let Some(speaks) = speaks {
        config.standings.speaks = speaks;
    }
    if division.is_some() {
        config.standings.division = division;
    }
}

/// Flags given to `speakers`. Unset flags keep the configured value.
#[derive(Default)]
struct SpeakerOverrides {
    division: Option<String>,
    drop_high: Option<usize>,
    drop_low: Option<usize>,
    top: Option<usize>,
    exclude_breaking: bool,
    break_size: Option<usize>,
}

/// Merges the flags into the configured speaker settings and, when
/// breaking teams are excluded, fills in the break from `team_results`.
fn speaker_awards_config(
    config: &Config,
    overrides: SpeakerOverrides,
    team_results: &[TeamResult],
) -> Result<SpeakerAwardsConfig> {
    let mut speakers = config.speakers.clone();
    if overrides.division.is_some() {
        speakers.division = overrides.division;
    }
    if let Some(drop_high) = overrides.drop_high {
        speakers.drop_high = drop_high;
    }
    if let Some(drop_low) = overrides.drop_low {
        speakers.drop_low = drop_low;
    }
    if overrides.top.is_some() {
        speakers.top = overrides.top;
    }
    speakers.exclude_breaking |= overrides.exclude_breaking;

    if speakers.exclude_breaking {
        if team_results.is_empty() {
            bail!(
                "excluding breaking teams needs team results to work out \
                 the break"
            );
        }
        let standings = TeamStandings::compute(team_results, &config.standings);
        speakers.breaking_teams = breaking_teams(
            &standings,
            overrides.break_size.unwrap_or(config.breaks.size),
        );
    }

    Ok(speakers)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Swiss {
            teams,
            results,
            allocation,
            method,
            seed,
            format,
            output,
        } => {
            override_pairing(&mut config, method, seed);

            let teams: Vec<TeamRecord> = match teams {
                Some(path) => read_json(&path)?,
                None => {
                    let results = results.load()?;
                    TeamStandings::compute(
                        &results.team_results,
                        &config.standings,
                    )
                    .team_records()
                }
            };
            let (judges, rooms) = allocation.load()?;

            let mut rng = config.pairing.rng();
            let draw = swiss::make_draw(
                &DrawInput::new(&teams).judges(&judges).rooms(&rooms),
                config.pairing.method,
                &mut rng,
            );

            write_draw(&draw, "Draw", format, output.as_deref())
        }
        Command::Elim {
            seeds,
            results,
            allocation,
            break_size,
            format,
            output,
        } => {
            let seeds: Vec<SeededTeam> = match seeds {
                Some(path) => read_json(&path)?,
                None => {
                    let results = results.load()?;
                    let standings = TeamStandings::compute(
                        &results.team_results,
                        &config.standings,
                    );
                    seed_break(
                        &standings,
                        break_size.unwrap_or(config.breaks.size),
                    )
                }
            };
            let (judges, rooms) = allocation.load()?;

            let draw = elim::make_draw(&seeds, &judges, &rooms);
            write_draw(&draw, "Elimination draw", format, output.as_deref())
        }
        Command::Standings {
            results,
            speaks,
            division,
            export: export_args,
        } => {
            override_standings(&mut config, speaks, division);

            let results = results.load()?;
            let standings = TeamStandings::compute(
                &results.team_results,
                &config.standings,
            );
            export(&standings, "Team standings", &export_args)
        }
        Command::Speakers {
            results,
            division,
            drop_high,
            drop_low,
            top,
            exclude_breaking,
            break_size,
            export: export_args,
        } => {
            let results = results.load()?;
            let speakers = speaker_awards_config(
                &config,
                SpeakerOverrides {
                    division,
                    drop_high,
                    drop_low,
                    top,
                    exclude_breaking,
                    break_size,
                },
                &results.team_results,
            )?;

            let standings =
                SpeakerStandings::compute(&results.speaker_scores, &speakers);
            export(&standings, "Speaker awards", &export_args)
        }
        Command::Break {
            results,
            size,
            output,
        } => {
            let results = results.load()?;
            let standings = TeamStandings::compute(
                &results.team_results,
                &config.standings,
            );
            let seeds =
                seed_break(&standings, size.unwrap_or(config.breaks.size));

            let json = serde_json::to_string_pretty(&seeds)?;
            write_output(output.as_deref(), json.as_bytes())
        }
    }
}
