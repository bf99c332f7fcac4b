// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the labyrinth binary.
//!
//! The CLI fetches GitHub snapshots into profile documents, renders cards
//! from them and exposes the level and attribute engines as JSON. Logs go to
//! stderr so stdout stays machine-readable.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    process,
};

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use labyrinth::{
    AssetStore, Error, Locale, Profile, RetryConfig, StatsCache, TtlCache, build_client,
    compose_campfire_card, compose_fallback_card, compose_status_card, compute_attributes,
    compute_level_progress, fetch_github_stats, fetch_language_bytes, io_error, load_profile,
    select_auto_equip, write_card,
};
use masterror::AppError;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Command line interface for rendering GitHub RPG cards.
#[derive(Debug, Parser,)]
#[command(name = "labyrinth", version, about = "Turn GitHub activity into RPG character cards")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Fetch GitHub stats and language bytes into a profile document.
    Fetch(FetchArgs,),
    /// Render a card from a profile document.
    Card(CardArgs,),
    /// Render the placeholder card for unregistered users.
    Fallback(FallbackArgs,),
    /// Print the level progress for a byte count as JSON.
    Level(LevelArgs,),
    /// Print the RPG attributes of a profile as JSON.
    Attributes(AttributesArgs,),
}

#[derive(Debug, Args,)]
struct FetchArgs
{
    /// GitHub login to fetch.
    #[arg(long = "login", value_name = "LOGIN")]
    login: String,

    /// Personal access token used for the GraphQL API.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Locale recorded in the generated profile.
    #[arg(long = "locale", value_name = "TAG", default_value = "en")]
    locale: String,

    /// Destination of the profile YAML; stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

/// Card layouts available to the `card` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum,)]
enum CardStyle
{
    /// Equipped character with attribute bars.
    Status,
    /// Up to four characters around a bonfire.
    Campfire,
}

#[derive(Debug, Args,)]
struct CardArgs
{
    /// Profile YAML document.
    #[arg(long = "profile", value_name = "PATH")]
    profile: PathBuf,

    /// Card layout.
    #[arg(long = "style", value_enum, default_value_t = CardStyle::Status)]
    style: CardStyle,

    /// Directory holding the font and sprite sheets.
    #[arg(long = "assets", value_name = "DIR", env = "LABYRINTH_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Destination SVG; stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
struct FallbackArgs
{
    /// Language tag for the card copy.
    #[arg(long = "locale", value_name = "TAG", default_value = "en")]
    locale: String,

    /// Directory holding the font.
    #[arg(long = "assets", value_name = "DIR", env = "LABYRINTH_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Destination SVG; stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
struct LevelArgs
{
    /// Cumulative bytes written in a language.
    #[arg(long = "bytes", value_name = "N")]
    bytes: u64,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
struct AttributesArgs
{
    /// Profile YAML document with a stats snapshot.
    #[arg(long = "profile", value_name = "PATH")]
    profile: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();

    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "labyrinth=info".into(),),)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr,),)
        .init();
}

/// Executes the CLI using parsed arguments.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch(args,) => run_fetch(args,),
        Command::Card(args,) => run_card(&args,),
        Command::Fallback(args,) => run_fallback(&args,),
        Command::Level(args,) => run_level(&args, &mut io::stdout().lock(),),
        Command::Attributes(args,) => run_attributes(&args, &mut io::stdout().lock(),),
    }
}

fn spinner() -> ProgressBar
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
            .unwrap_or_else(|_| ProgressStyle::default_spinner(),),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(120,),);
    pb
}

/// Handles the `fetch` subcommand.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an invalid login and [`Error::Service`]
/// when GitHub cannot be reached.
fn run_fetch(args: FetchArgs,) -> Result<(), Error,>
{
    let mut profile = Profile {
        locale: args.locale.trim().to_owned(), ..Profile::new(args.login.trim(),)
    };
    profile.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::service(format!("failed to start async runtime: {e}"),),)?;

    let retry = RetryConfig::default();
    let now = Utc::now();
    let today = now.date_naive();
    let login = profile.username.clone();
    let (stats_cache, bytes_cache,) = seed_caches(args.output.as_deref(), &login,);

    let pb = spinner();
    let fetched = runtime.block_on(async {
        let client = build_client(args.token.as_deref(),)?;
        pb.set_message(format!("Fetching stats for {login}..."),);
        let stats = stats_cache
            .get_or_load(&login, now, || fetch_github_stats(&client, &login, &retry, today,),)
            .await?;
        pb.set_message(format!("Fetching language bytes for {login}..."),);
        let language_bytes = bytes_cache
            .get_or_load(&login, now, || fetch_language_bytes(&client, &login, &retry,),)
            .await?;
        Ok::<_, AppError,>((stats, language_bytes,),)
    },);
    pb.finish_and_clear();
    let (stats, language_bytes,) = fetched?;

    profile.stats = Some(stats,);
    profile.language_bytes = language_bytes;
    let characters = profile.characters();
    profile.equipped = select_auto_equip(&characters,).map(|character| character.language.clone(),);

    let yaml = profile.to_yaml()?;
    match args.output.as_deref() {
        Some(path,) => {
            write_text(path, &yaml,)?;
            info!(path = %path.display(), "wrote profile");
        }
        None => write_stdout(&yaml,)?,
    }
    Ok((),)
}

/// Caches seeded from the profile a previous `fetch` wrote to `output`.
///
/// The file's modification time stands in for the fetch time: a profile
/// written within the TTL is reused without calling GitHub, an older one is
/// served only when the refresh fails.
fn seed_caches(
    output: Option<&Path,>,
    login: &str,
) -> (StatsCache, TtlCache<BTreeMap<String, u64,>,>,)
{
    let stats_cache = StatsCache::default();
    let bytes_cache = TtlCache::default();

    let Some(path,) = output else {
        return (stats_cache, bytes_cache,);
    };
    let Ok(modified,) = fs::metadata(path,).and_then(|metadata| metadata.modified(),) else {
        return (stats_cache, bytes_cache,);
    };
    let fetched_at = DateTime::<Utc,>::from(modified,);

    match load_profile(path,) {
        Ok(previous,) if previous.username.eq_ignore_ascii_case(login,) => {
            if let Some(stats,) = previous.stats {
                stats_cache.insert(login, stats, fetched_at,);
                bytes_cache.insert(login, previous.language_bytes, fetched_at,);
                debug!(path = %path.display(), %fetched_at, "seeded caches from previous profile");
            }
        }
        Ok(previous,) => {
            debug!(
                path = %path.display(),
                owner = %previous.username,
                "previous profile belongs to another login"
            );
        }
        Err(error,) => debug!(path = %path.display(), %error, "previous profile is not reusable"),
    }

    (stats_cache, bytes_cache,)
}

/// Handles the `card` subcommand.
fn run_card(args: &CardArgs,) -> Result<(), Error,>
{
    let profile = load_profile(&args.profile,)?;
    let assets = AssetStore::new(&args.assets,);
    let locale = Locale::from_tag(&profile.locale,);

    let svg = match args.style {
        CardStyle::Status => compose_status_card(&profile, &assets, &locale, Utc::now(),)?,
        CardStyle::Campfire => compose_campfire_card(&profile, &assets, &locale,)?,
    };
    emit_card(args.output.as_deref(), &svg,)
}

/// Handles the `fallback` subcommand.
fn run_fallback(args: &FallbackArgs,) -> Result<(), Error,>
{
    let assets = AssetStore::new(&args.assets,);
    let svg = compose_fallback_card(&assets, &args.locale,)?;
    emit_card(args.output.as_deref(), &svg,)
}

fn run_level<W: io::Write,>(args: &LevelArgs, writer: &mut W,) -> Result<(), Error,>
{
    write_json(writer, &compute_level_progress(args.bytes,), args.pretty,)
}

fn run_attributes<W: io::Write,>(args: &AttributesArgs, writer: &mut W,) -> Result<(), Error,>
{
    let profile = load_profile(&args.profile,)?;
    let stats = profile.stats.as_ref().ok_or_else(|| {
        Error::validation(format!("profile '{}' has no stats snapshot", profile.username),)
    },)?;
    write_json(writer, &compute_attributes(stats, Utc::now(),), args.pretty,)
}

fn write_json<W: io::Write, T: Serialize,>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, value,)?;
    } else {
        serde_json::to_writer(writer, value,)?;
    }

    Ok((),)
}

fn emit_card(output: Option<&Path,>, svg: &str,) -> Result<(), Error,>
{
    match output {
        Some(path,) => {
            write_card(path, svg,)?;
            info!(path = %path.display(), "wrote card");
            Ok((),)
        }
        None => write_stdout(svg,),
    }
}

fn write_text(path: &Path, contents: &str,) -> Result<(), Error,>
{
    if let Some(parent,) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent,).map_err(|source| io_error(parent, source,),)?;
    }
    std::fs::write(path, contents,).map_err(|source| io_error(path, source,),)
}

fn write_stdout(contents: &str,) -> Result<(), Error,>
{
    io::stdout()
        .lock()
        .write_all(contents.as_bytes(),)
        .map_err(|source| io_error(Path::new("<stdout>",), source,),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, io::Cursor};

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    const PROFILE: &str = r#"
username: octocat
locale: ko
stats:
  totalStars: 10
  totalCommits: 420
  totalPRs: 12
  totalIssues: 3
  topLanguage: Rust
  currentStreak: 365
  longestStreak: 400
  followers: 2000
  createdAt: 2015-01-01T00:00:00Z
  totalContributions: 6000
  contributedRepos: 80
language_bytes:
  Rust: 120000
"#;

    fn write_assets(root: &Path,)
    {
        fs::write(root.join(labyrinth::FONT_FILE,), b"FONT",).expect("font",);
        fs::write(root.join(labyrinth::BONFIRE_SPRITE,), b"fire",).expect("bonfire",);
        let sprites = labyrinth::resolve_job_sprites("rust",);
        for file in [sprites.standing, sprites.sitting, sprites.back] {
            let path = root.join(file,);
            fs::create_dir_all(path.parent().expect("sprite dir",),).expect("mkdir",);
            fs::write(path, b"png",).expect("sprite",);
        }
    }

    #[test]
    fn card_defaults_to_status_style()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "card",
            "--profile",
            "me.yaml",
            "--assets",
            "sprites",
        ],)
        .expect("failed to parse CLI",);

        match cli.command {
            Command::Card(args,) => {
                assert_eq!(args.style, CardStyle::Status);
                assert_eq!(args.assets, PathBuf::from("sprites"));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn fetch_requires_login()
    {
        assert!(Cli::try_parse_from([env!("CARGO_PKG_NAME"), "fetch"],).is_err());
    }

    #[test]
    fn fetch_rejects_invalid_login_before_network()
    {
        let args = FetchArgs {
            login: "-bad-".to_owned(), token: None, locale: "en".to_owned(), output: None,
        };
        let error = run_fetch(args,).expect_err("invalid login",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn fresh_previous_profile_is_reused()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("octocat.yaml",);
        fs::write(&path, PROFILE,).expect("profile",);

        let (stats_cache, bytes_cache,) = seed_caches(Some(&path,), "OctoCat",);
        let stats = stats_cache.get_fresh("OctoCat", Utc::now(),).expect("fresh stats",);
        assert_eq!(stats.total_commits, 420);
        let bytes = bytes_cache.get_fresh("OctoCat", Utc::now(),).expect("fresh bytes",);
        assert_eq!(bytes["Rust"], 120_000);
    }

    #[test]
    fn previous_profile_of_another_login_is_ignored()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("profile.yaml",);
        fs::write(&path, PROFILE,).expect("profile",);

        let (stats_cache, bytes_cache,) = seed_caches(Some(&path,), "hubot",);
        assert!(stats_cache.get_stale("hubot",).is_none());
        assert!(bytes_cache.get_stale("hubot",).is_none());
    }

    #[test]
    fn missing_output_seeds_nothing()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("absent.yaml",);

        let (stats_cache, _,) = seed_caches(Some(&path,), "octocat",);
        assert!(stats_cache.get_stale("octocat",).is_none());
        let (stats_cache, _,) = seed_caches(None, "octocat",);
        assert!(stats_cache.get_stale("octocat",).is_none());
    }

    #[tokio::test]
    async fn stale_previous_profile_survives_failed_refresh()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("octocat.yaml",);
        fs::write(&path, PROFILE,).expect("profile",);
        let (stats_cache, _,) = seed_caches(Some(&path,), "octocat",);

        let later = Utc::now() + chrono::Duration::hours(2,);
        let stats = stats_cache
            .get_or_load("octocat", later, || async {
                Err(AppError::service("GitHub unavailable",),)
            },)
            .await
            .expect("stale snapshot",);
        assert_eq!(stats.current_streak, 365);
    }

    #[test]
    fn level_prints_progress_json()
    {
        let args = LevelArgs {
            bytes: 75_000, pretty: false,
        };
        let mut buffer = Cursor::new(Vec::new(),);
        run_level(&args, &mut buffer,).expect("serializes",);

        let output = String::from_utf8(buffer.into_inner(),).expect("invalid UTF-8",);
        let value: serde_json::Value = serde_json::from_str(&output,).expect("valid JSON",);
        assert_eq!(value["level"], 3);
        assert_eq!(value["current"], 25_000);
        assert_eq!(value["required"], 150_000);
        assert_eq!(value["isMax"], false);
    }

    #[test]
    fn pretty_level_output_is_indented()
    {
        let args = LevelArgs {
            bytes: 2_000_000, pretty: true,
        };
        let mut buffer = Cursor::new(Vec::new(),);
        run_level(&args, &mut buffer,).expect("serializes",);
        let output = String::from_utf8(buffer.into_inner(),).expect("invalid UTF-8",);
        assert!(output.starts_with("{\n  \"level\": 5"));
    }

    #[test]
    fn attributes_reads_profile_stats()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("profile.yaml",);
        fs::write(&path, PROFILE,).expect("profile",);

        let args = AttributesArgs {
            profile: path, pretty: false,
        };
        let mut buffer = Cursor::new(Vec::new(),);
        run_attributes(&args, &mut buffer,).expect("serializes",);

        let value: serde_json::Value =
            serde_json::from_slice(&buffer.into_inner(),).expect("valid JSON",);
        assert_eq!(value["attributes"]["vit"], 100);
        assert_eq!(value["attributes"]["cha"], 100);
        assert_eq!(value["isKindled"], true);
    }

    #[test]
    fn attributes_without_stats_is_a_validation_error()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("profile.yaml",);
        fs::write(&path, "username: octocat\n",).expect("profile",);

        let args = AttributesArgs {
            profile: path, pretty: false,
        };
        let error = run_attributes(&args, &mut Cursor::new(Vec::new(),),).expect_err("no stats",);
        match error {
            Error::Validation {
                message,
            } => assert!(message.contains("has no stats")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn card_command_writes_campfire_svg()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let profile_path = temp.path().join("profile.yaml",);
        fs::write(&profile_path, PROFILE,).expect("profile",);
        write_assets(temp.path(),);
        let output = temp.path().join("out/campfire.svg",);

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "card",
            "--profile",
            profile_path.to_str().expect("utf8",),
            "--style",
            "campfire",
            "--assets",
            temp.path().to_str().expect("utf8",),
            "--output",
            output.to_str().expect("utf8",),
        ],)
        .expect("failed to parse card command",);

        let args = match cli.command {
            Command::Card(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        run_card(&args,).expect("card renders",);

        let svg = fs::read_to_string(output,).expect("card written",);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("대장장이"));
    }

    #[test]
    fn fallback_command_writes_localized_card()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        write_assets(temp.path(),);
        let output = temp.path().join("fallback.svg",);

        let args = FallbackArgs {
            locale: "ko".to_owned(), assets: temp.path().to_path_buf(), output: Some(output.clone(),),
        };
        run_fallback(&args,).expect("fallback renders",);

        let svg = fs::read_to_string(output,).expect("card written",);
        assert!(svg.contains("아직 등록되지 않은 모험가입니다."));
    }
}
