use crate::command::{Command, ParseCommandError};
use gridsnake::Simulation;
use rand::Rng;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Drives a [`Simulation`] from a script of commands, writing a JSON snapshot
/// line for every `snapshot` command and once more at the end.
#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    sim: Simulation<R>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(sim: Simulation<R>) -> App<R> {
        App { sim }
    }

    pub(crate) fn run<I: BufRead, O: Write>(
        mut self,
        script: I,
        mut out: O,
    ) -> Result<Simulation<R>, ScriptError> {
        for (i, line) in script.lines().enumerate() {
            let line = line.map_err(ScriptError::Read)?;
            let lineno = i + 1;
            let cmd = Command::from_line(&line)
                .map_err(|source| ScriptError::Parse { lineno, source })?;
            if let Some(cmd) = cmd {
                log::trace!("Line {lineno}: {cmd:?}");
                if self.apply(cmd) {
                    self.emit(&mut out)?;
                }
            }
        }
        self.emit(&mut out)?;
        out.flush().map_err(ScriptError::Write)?;
        Ok(self.sim)
    }

    /// Apply `cmd` to the simulation.  Returns `true` if a snapshot should be
    /// emitted.
    fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Start => self.sim.start(),
            Command::Restart => self.sim.restart(),
            Command::Pause => self.sim.pause(),
            Command::Resume => self.sim.resume(),
            Command::Turn(dir) => self.sim.request_direction(dir),
            Command::Advance(delta) => {
                let ticks = self.sim.advance(delta);
                log::debug!("Advanced {delta:?}: {ticks} tick(s)");
            }
            Command::Frames(total) => {
                let ticks = self.sim.advance_in_frames(total);
                log::debug!("Advanced {total:?} in frames: {ticks} tick(s)");
            }
            Command::Snapshot => return true,
        }
        false
    }

    fn emit<O: Write>(&self, mut out: O) -> Result<(), ScriptError> {
        let json = self.sim.snapshot().to_json().map_err(ScriptError::Serialize)?;
        writeln!(out, "{json}").map_err(ScriptError::Write)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("failed to read script")]
    Read(#[source] io::Error),
    #[error("invalid command on line {lineno}")]
    Parse {
        lineno: usize,
        source: ParseCommandError,
    },
    #[error("failed to serialize snapshot")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write snapshot")]
    Write(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnake::{Mode, Rules};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn run_script(script: &str) -> (Result<Simulation<ChaCha12Rng>, ScriptError>, String) {
        let sim = Simulation::new_with_rng(Rules::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        let mut out = Vec::new();
        let r = App::new(sim).run(script.as_bytes(), &mut out);
        let out = String::from_utf8(out).expect("output should be UTF-8");
        (r, out)
    }

    #[test]
    fn replay_scenario() {
        let (r, out) = run_script(concat!(
            "# first fruit\n",
            "start\n",
            "advance 190\n",
            "snapshot\n",
            "\n",
            "advance 380\n",
        ));
        let sim = r.expect("script should run");
        assert_eq!(sim.mode(), Mode::Playing);
        assert_eq!(sim.score(), 1);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"mode":"playing","#));
        assert!(lines[0].contains(
            r#""snake":[{"x":9,"z":8,"role":"head"},{"x":8,"z":8,"role":"body"},{"x":7,"z":8,"role":"body"}]"#
        ));
        assert!(lines[1].contains(r#""score":1,"best":0,"tickIntervalMs":187"#));
    }

    #[test]
    fn replay_is_deterministic() {
        let script = "start\nadvance 570\nup\nframes 1000\nleft\nadvance 2000\nsnapshot\n";
        let (_, out1) = run_script(script);
        let (_, out2) = run_script(script);
        assert_eq!(out1, out2);
    }

    #[test]
    fn replay_parse_error_line() {
        let (r, out) = run_script("start\n\nadvance nope\n");
        match r {
            Err(ScriptError::Parse { lineno, .. }) => assert_eq!(lineno, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn replay_empty_script() {
        let (r, out) = run_script("");
        assert_eq!(r.expect("script should run").mode(), Mode::Menu);
        assert!(out.starts_with(r#"{"mode":"menu","#));
        assert_eq!(out.lines().count(), 1);
    }
}
