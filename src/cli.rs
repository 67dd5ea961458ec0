use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use iq180::puzzle::TargetOrigin;
use iq180::session::{AnswerStatus, TOTAL_PROBLEMS};
use iq180::{
    DigitMultiset, GameConfig, OperatorTier, Puzzle, PuzzleGenerator, Session, check, evaluate,
    expression::evaluate_for_tier,
};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Operator tier as typed on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TierArg {
    #[value(alias = "1")]
    Easy,
    #[value(alias = "2")]
    Medium,
    #[value(alias = "3")]
    Hard,
}

impl From<TierArg> for OperatorTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Easy => OperatorTier::Easy,
            TierArg::Medium => OperatorTier::Medium,
            TierArg::Hard => OperatorTier::Hard,
        }
    }
}

/// IQ180 - Reach the target number using every digit exactly once
#[derive(Parser, Debug)]
#[command(name = "iq180")]
#[command(about = "Generate digit puzzles and grade arithmetic answers")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Operator tier
    #[arg(short, long, value_enum, default_value = "easy")]
    pub tier: TierArg,

    /// Number of digits handed out (4 or 5)
    #[arg(short, long, default_value_t = 4)]
    pub digits: usize,

    /// Decimal width of the target (2 or 3)
    #[arg(short, long, default_value_t = 2)]
    pub width: usize,

    /// Seed for reproducible puzzles
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate and print one puzzle
    Generate(SettingsArgs),
    /// Grade an expression against given digits and target
    Check {
        /// The expression to grade
        expression: String,
        /// Digits of the puzzle, e.g. 2345 or 2,3,4,5
        #[arg(short, long)]
        digits: String,
        /// Target value
        #[arg(long)]
        target: u32,
        /// Operator tier
        #[arg(short, long, value_enum, default_value = "hard")]
        tier: TierArg,
    },
    /// Evaluate an expression and print its value
    Eval {
        expression: String,
        /// Restrict to the operators of this tier
        #[arg(short, long, value_enum)]
        tier: Option<TierArg>,
    },
    /// Play a round of ten puzzles on stdin
    Play(SettingsArgs),
}

impl SettingsArgs {
    fn config(&self) -> Result<GameConfig> {
        GameConfig::from_raw(self.tier.into(), self.digits, self.width)
            .context("Invalid game settings")
    }

    fn generator(&self) -> PuzzleGenerator {
        match self.seed {
            Some(seed) => PuzzleGenerator::with_seed(seed),
            None => PuzzleGenerator::new(),
        }
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}

fn describe(puzzle: &Puzzle) -> String {
    let operators: Vec<&str> = puzzle.operators().iter().map(|op| op.glyph()).collect();
    format!(
        "Digits: {}\nTarget: {}\nOperators: {}",
        puzzle.digits(),
        puzzle.target(),
        operators.join(" ")
    )
}

/// Play one round, reading answers line by line from `input`.
///
/// A line reading `skip` (or end of input) skips the current puzzle.
pub fn play_round<R: BufRead, W: Write>(
    generator: &mut PuzzleGenerator,
    config: &GameConfig,
    mut input: R,
    output: &mut W,
) -> Result<Session> {
    let mut session = Session::new(*config);

    while !session.is_complete() {
        let puzzle = generator.generate(config);
        writeln!(
            output,
            "\nQuestion {}/{}\n{}",
            session.answers().len() + 1,
            TOTAL_PROBLEMS,
            describe(&puzzle)
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let started = Instant::now();
        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read answer")?;
        let answer = line.trim();

        if read == 0 || answer.eq_ignore_ascii_case("skip") {
            session.record_skip(&puzzle, started.elapsed())?;
            writeln!(output, "Skipped.")?;
            continue;
        }

        let verdict = check(answer, &puzzle);
        let status = session.record_answer(&puzzle, answer, &verdict, started.elapsed())?;
        match (status, verdict.evaluated_result) {
            (AnswerStatus::Correct, _) => writeln!(output, "Correct!")?,
            _ if !verdict.numbers_match => {
                writeln!(output, "Use each of the digits {} exactly once.", puzzle.digits())?
            }
            (_, Some(value)) => writeln!(output, "That gives {}, not {}.", value, puzzle.target())?,
            (_, None) => match &verdict.failure {
                Some(e) => writeln!(output, "Could not evaluate: {}", e)?,
                None => writeln!(output, "Could not evaluate.")?,
            },
        }
    }

    writeln!(
        output,
        "\nScore: {} / {}\nAccuracy: {:.1}%\nTime: {:.2}s total, {:.2}s per question",
        session.score(),
        session.max_score(),
        session.accuracy(),
        session.total_time().as_secs_f64(),
        session.average_time().as_secs_f64()
    )?;
    Ok(session)
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    init_logging(&args.log_level)?;

    match args.command {
        Command::Generate(settings) => {
            let config = settings.config()?;
            let puzzle = settings.generator().generate(&config);
            if let TargetOrigin::Fallback = puzzle.origin() {
                warn!("Target was not derived from the digits");
            }
            println!("{}", describe(&puzzle));
            Ok(())
        }
        Command::Check {
            expression,
            digits,
            target,
            tier,
        } => {
            let digits: DigitMultiset = digits.parse().context("Invalid digit string")?;
            let puzzle = Puzzle::new(0, digits, target, tier.into());
            let verdict = check(&expression, &puzzle);
            info!("Verdict: {:?}", verdict);
            println!("numbers match: {}", verdict.numbers_match);
            println!("correct: {}", verdict.is_correct);
            match (verdict.evaluated_result, &verdict.failure) {
                (Some(value), _) => println!("result: {}", value),
                (None, Some(e)) => println!("error: {}", e),
                (None, None) => {}
            }
            Ok(())
        }
        Command::Eval { expression, tier } => {
            let outcome = match tier {
                Some(tier) => evaluate_for_tier(&expression, tier.into()),
                None => evaluate(&expression),
            };
            match outcome.into_result() {
                Ok(value) => {
                    println!("{}", value);
                    Ok(())
                }
                Err(e) => Err(e).context("Evaluation failed"),
            }
        }
        Command::Play(settings) => {
            let config = settings.config()?;
            let mut generator = settings.generator();
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            play_round(&mut generator, &config, stdin.lock(), &mut stdout)?;
            Ok(())
        }
    }
}
