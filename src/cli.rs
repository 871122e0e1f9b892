use std::io::{ self, BufRead, IsTerminal, Write };
use std::path::PathBuf;

use clap::{ ArgAction, Args, Parser, Subcommand };
use serde::Serialize;

use crate::charset::CharacterCategory;
use crate::config::{ Config, MAX_LENGTH };
use crate::errors::AppError;
use crate::password::GenerationRequest;
use crate::random::{ RandomSource, RngSource };
use crate::strength::{ score, StrengthReport };

const BAR_WIDTH: usize = 20;

#[derive(Debug, Parser)]
#[command(
    name = "passforge",
    version,
    about = "Generate random passwords and rate their strength",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Config file to read defaults from
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate passwords (the default)
    Generate(GenerateArgs),
    /// Rate an existing password
    Score(ScoreArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Password length
    #[arg(short = 'L', long, value_parser = clap::value_parser!(u16).range(..=MAX_LENGTH as i64))]
    pub length: Option<u16>,

    #[arg(short = 'u', long)]
    pub no_uppercase: bool,

    #[arg(short = 'l', long)]
    pub no_lowercase: bool,

    #[arg(short = 'n', long)]
    pub no_numbers: bool,

    #[arg(short = 's', long)]
    pub no_specials: bool,

    /// How many passwords to print
    #[arg(short = 'c', long)]
    pub count: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// One JSON object per line
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Flags win over the config file; `--no-*` always disables.
    pub fn request(&self, config: &Config) -> GenerationRequest {
        let mut categories = config.categories();
        let disabled = [
            (CharacterCategory::Uppercase, self.no_uppercase),
            (CharacterCategory::Lowercase, self.no_lowercase),
            (CharacterCategory::Digit, self.no_numbers),
            (CharacterCategory::Symbol, self.no_specials),
        ];
        for (category, off) in disabled {
            if off {
                categories.remove(&category);
            }
        }

        let length = self.length.map(usize::from).unwrap_or(config.length);
        GenerationRequest::new(length, categories)
    }

    pub fn count(&self, config: &Config) -> usize {
        self.count.unwrap_or(config.count).max(1)
    }

    fn rng(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => {
                tracing::warn!("using seeded generator, output is reproducible");
                Box::new(RngSource::seeded(seed))
            }
            None => Box::new(RngSource::system()),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ScoreArgs {
    /// Password to rate; read from stdin when omitted
    pub password: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Scored<'a> {
    password: &'a str,
    #[serde(flatten)]
    report: StrengthReport,
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let stdout = io::stdout();
    let colored = stdout.is_terminal();
    let mut out = stdout.lock();

    match cli.command {
        Some(Command::Score(args)) => score_to(&mut io::stdin().lock(), &mut out, &args, colored),
        Some(Command::Generate(args)) => {
            let config = Config::load(cli.config.as_deref())?;
            generate_to(&mut out, &args, &config, args.rng().as_mut(), colored)
        }
        None => {
            let config = Config::load(cli.config.as_deref())?;
            let args = cli.generate;
            generate_to(&mut out, &args, &config, args.rng().as_mut(), colored)
        }
    }
}

pub fn generate_to<W: Write>(
    out: &mut W,
    args: &GenerateArgs,
    config: &Config,
    rng: &mut dyn RandomSource,
    colored: bool,
) -> Result<(), AppError> {
    let request = args.request(config);
    let count = args.count(config);

    tracing::info!(length = request.length, count, "generating passwords");

    for _ in 0..count {
        let password = request.generate(rng)?;
        write_scored(out, &password, args.json, colored)?;
    }

    Ok(())
}

/// Scores the password argument, or the first line of `input` without it.
pub fn score_to<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    args: &ScoreArgs,
    colored: bool,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_line(input)?,
    };
    write_scored(out, &password, args.json, colored)
}

fn write_scored<W: Write>(out: &mut W, password: &str, json: bool, colored: bool) -> Result<(), AppError> {
    let report = score(password);

    if json {
        serde_json::to_writer(&mut *out, &Scored { password, report })?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", password)?;
        writeln!(out, "Strength: {}", render(&report, colored))?;
    }

    Ok(())
}

/// Strength bar; never empty thanks to the score floor.
pub fn render(report: &StrengthReport, colored: bool) -> String {
    let filled = (usize::from(report.score) * BAR_WIDTH + 50) / 100;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));

    if colored {
        let (r, g, b) = report.color.rgb();
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m {} ({}/100)", r, g, b, bar, report.label, report.score)
    } else {
        format!("{} {} ({}/100)", bar, report.label, report.score)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
