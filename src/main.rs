mod app;
mod command;
use crate::app::App;
use anyhow::Context;
use gridsnake::{Config, Simulation};
use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use rand::{rngs::StdRng, Rng, SeedableRng};
use simplelog::WriteLogger;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [<options>] [<script>]

Replay a script of snake commands and print snapshots as JSON lines.

Script commands (one per line; '#' starts a comment):
  start | restart | pause | resume | snapshot
  up | down | left | right | turn <direction>
  advance <ms> | frames <ms>

Options:
  -c, --config <path>       Read configuration from the given file
  -s, --seed <n>            Seed the fruit placement RNG
  -l, --log-level <level>   Log messages at or above <level> to stderr
  -v, --verbose             Shorthand for --log-level debug
  -h, --help                Show this help and exit
  -V, --version             Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('s') | Arg::Long("seed") => {
                    args.seed = Some(parser.value()?.parse()?);
                }
                Arg::Short('l') | Arg::Long("log-level") => {
                    args.log_level = Some(parser.value()?.parse()?);
                }
                Arg::Short('v') | Arg::Long("verbose") => {
                    args.log_level = Some(LevelFilter::Debug);
                }
                Arg::Value(path) if args.script.is_none() => {
                    args.script = Some(PathBuf::from(path));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => args.run(),
            Command::Help => {
                print!("{USAGE}");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
    log_level: Option<LevelFilter>,
    script: Option<PathBuf>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::default_path().and_then(|path| Config::load(&path, true)),
        }
        .context("failed to load configuration")?;
        let level = self.log_level.unwrap_or(config.logging.level);
        WriteLogger::init(level, simplelog::Config::default(), io::stderr())
            .context("failed to initialize logger")?;
        log::info!("Starting gridsnake with {:?}", config.rules);
        match self.seed {
            Some(seed) => self.replay(Simulation::new_with_rng(
                config.rules,
                StdRng::seed_from_u64(seed),
            )),
            None => self.replay(Simulation::new(config.rules)),
        }
    }

    fn replay<R: Rng>(&self, sim: Simulation<R>) -> anyhow::Result<()> {
        let stdout = io::stdout().lock();
        let sim = match self.script {
            Some(ref path) => {
                let fp = fs_err::File::open(path).context("failed to open script")?;
                App::new(sim).run(BufReader::new(fp), stdout)
            }
            None => App::new(sim).run(io::stdin().lock(), stdout),
        }
        .context("replay failed")?;
        log::info!(
            "Replay finished in mode {}; score = {}, best = {}",
            sim.mode(),
            sim.score(),
            sim.best()
        );
        Ok(())
    }
}

fn main() -> ExitCode {
    let r = Command::from_parser(Parser::from_env())
        .map_err(anyhow::Error::from)
        .and_then(Command::run);
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == io::ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let argv = std::iter::once("gridsnake")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect::<Vec<_>>();
        Command::from_parser(Parser::from_iter(argv))
    }

    #[test]
    fn no_args() {
        assert_eq!(
            parse(&[]).expect("should parse"),
            Command::Run(Arguments::default())
        );
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&[
                "--config",
                "cfg.toml",
                "-s",
                "42",
                "--log-level",
                "trace",
                "script.txt"
            ])
            .expect("should parse"),
            Command::Run(Arguments {
                config: Some(PathBuf::from("cfg.toml")),
                seed: Some(42),
                log_level: Some(LevelFilter::Trace),
                script: Some(PathBuf::from("script.txt")),
            })
        );
    }

    #[test]
    fn verbose() {
        assert_eq!(
            parse(&["-v"]).expect("should parse"),
            Command::Run(Arguments {
                log_level: Some(LevelFilter::Debug),
                ..Arguments::default()
            })
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["-h"]).expect("should parse"), Command::Help);
        assert_eq!(
            parse(&["--seed", "1", "--version"]).expect("should parse"),
            Command::Version
        );
    }

    #[test]
    fn bad_args() {
        assert!(parse(&["--seed", "many"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--log-level", "loud"]).is_err());
    }
}
