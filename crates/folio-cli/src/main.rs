mod render;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use folio_config::Config;
use folio_engine::{
    MismatchPolicy, PlayLibrary, list_metadata, parse_html, read_play_source, write_play,
};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::io::{Write, stdout};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Split a scraped HTML play into per-scene JSON and read passages back"
)]
struct Args {
    /// Config file to use instead of ~/.config/folio/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the play document and write one JSON file per scene.
    Munge {
        /// The HTML document; defaults to `play_path` from the config.
        input: Option<PathBuf>,
        /// Output directory; defaults to `scenes_dir` from the config.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Fail when a citation disagrees with the scene headings.
        #[arg(long)]
        strict: bool,
    },
    /// Print a table of contents built from the scene files.
    Contents {
        #[arg(long)]
        scenes: Option<PathBuf>,
    },
    /// Print the lines START to END of a scene.
    Quote {
        act: u32,
        scene: u32,
        start: u32,
        end: u32,
        #[arg(long)]
        scenes: Option<PathBuf>,
    },
    /// Print a short random passage.
    Random {
        #[arg(long)]
        scenes: Option<PathBuf>,
        /// Seed for a reproducible pick.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = load_config(args.config)?;
    let command = args.command.unwrap_or(Command::Random {
        scenes: None,
        seed: None,
    });

    match command {
        Command::Munge { input, out, strict } => munge(&config, input, out, strict),
        Command::Contents { scenes } => contents(&config, scenes),
        Command::Quote {
            act,
            scene,
            start,
            end,
            scenes,
        } => quote(&config, scenes, act, scene, start, end),
        Command::Random { scenes, seed } => random(&config, scenes, seed),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => match Config::load_from_path(&path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

fn munge(
    config: &Config,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    let Some(input) = input.or_else(|| config.play_path.clone()) else {
        bail!("No play document given and no play_path configured");
    };
    let out = out.unwrap_or_else(|| config.scenes_dir.clone());

    let mut options = config.parsing.clone();
    if strict {
        options.on_mismatch = MismatchPolicy::Fail;
    }

    let html = read_play_source(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let play = parse_html(&html, &options).map_err(|err| {
        let at = err
            .position()
            .map(|position| format!(" at body element {position}"))
            .unwrap_or_default();
        anyhow::Error::new(err).context(format!("Failed to parse {}{at}", input.display()))
    })?;

    let paths = write_play(&play, &out)
        .with_context(|| format!("Failed to write scenes to {}", out.display()))?;
    for path in &paths {
        log::info!("Wrote {}", path.display());
    }
    log::info!("{} scenes written to {}", paths.len(), out.display());
    Ok(())
}

fn scenes_dir(config: &Config, scenes: Option<PathBuf>) -> PathBuf {
    scenes.unwrap_or_else(|| config.scenes_dir.clone())
}

fn load_library(config: &Config, scenes: Option<PathBuf>) -> Result<PlayLibrary> {
    let dir = scenes_dir(config, scenes);
    PlayLibrary::load(&dir).with_context(|| format!("Failed to load scenes from {}", dir.display()))
}

fn contents(config: &Config, scenes: Option<PathBuf>) -> Result<()> {
    let dir = scenes_dir(config, scenes);
    let listing =
        list_metadata(&dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut out = stdout().lock();
    render::contents(&mut out, &listing, &config.display)?;
    out.flush()?;
    Ok(())
}

fn quote(
    config: &Config,
    scenes: Option<PathBuf>,
    act: u32,
    scene: u32,
    start: u32,
    end: u32,
) -> Result<()> {
    let library = load_library(config, scenes)?;
    let blocks = library.quote(act, scene, start..=end)?;

    let mut out = stdout().lock();
    render::passage(&mut out, &blocks, &config.display)?;
    out.flush()?;
    Ok(())
}

fn random(config: &Config, scenes: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    let library = load_library(config, scenes)?;
    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(Xoshiro256StarStar::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let blocks = library.random_passage(rng.as_mut())?;

    let mut out = stdout().lock();
    render::passage(&mut out, &blocks, &config.display)?;
    out.flush()?;
    Ok(())
}
