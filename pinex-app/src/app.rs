use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use pinex_core::{BuiltinCatalogue, ParticipantId, SessionPhase, WorkloadRatings};
use pinex_experiment::{Session, StudyConfig, WORKLOAD_DIMENSIONS};
use pinex_report::{aggregate, DirSink, FileSink};
use pinex_store::JsonFileStore;

/// Console driver for one study session. Every decision lives in the
/// library crates; this only turns lines of input into session calls and
/// prints the results.
pub struct App {
    session: Session<BuiltinCatalogue, JsonFileStore>,
    out_dir: PathBuf,
    mirror_dir: Option<PathBuf>,
}

impl App {
    pub fn new(
        participant: u32,
        data_dir: PathBuf,
        out_dir: PathBuf,
        mirror_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let participant =
            ParticipantId::new(participant).context("participant number must be positive")?;
        let store = JsonFileStore::new(data_dir);
        let session = Session::start(participant, StudyConfig::default(), BuiltinCatalogue, store)
            .context("failed to open session")?;

        Ok(Self {
            session,
            out_dir,
            mirror_dir,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();

        println!("=== PIN ENTRY STUDY ===");
        println!("Participant: {}", self.session.participant());
        println!("Watch each video, then guess its 4-digit code. Up to 3 guesses per video.\n");

        loop {
            match self.session.phase() {
                SessionPhase::Trial => self.run_trial(&mut input)?,
                SessionPhase::Questionnaire => self.run_questionnaire(&mut input)?,
                SessionPhase::Transition => self.run_transition(&mut input)?,
                SessionPhase::Finished => break,
            }
        }

        self.export_results()?;
        println!("\nExperiment completed.");
        println!("Results saved. Thank you!");
        Ok(())
    }

    fn run_trial(&mut self, input: &mut impl BufRead) -> Result<()> {
        let trial = self.session.current_trial().context("no active trial")?;
        let video = trial.stimulus.video_name().to_string();
        let (index, total) = self.session.trial_progress().context("no active trial")?;
        let max_attempts = self.session.config().max_attempts;

        println!(
            "[{}] Video {index}/{total}: {video}",
            self.session.current_condition()
        );
        wait_for_enter(input, "Press ENTER when the video has finished:")?;
        self.session.video_ended()?;

        loop {
            print!("Your guess: ");
            io::stdout().flush()?;
            let raw = read_line(input)?;
            match self.session.submit_guess(&raw) {
                Ok(feedback) if feedback.correct => {
                    println!("Correct!");
                    break;
                }
                Ok(feedback) if feedback.completed => {
                    println!("Incorrect. No attempts left, moving on.");
                    break;
                }
                Ok(feedback) => {
                    println!(
                        "Incorrect, try again ({} of {max_attempts} attempts used).",
                        feedback.attempt
                    );
                }
                Err(err) if err.is_recoverable() => println!("{err}"),
                Err(err) => return Err(err.into()),
            }
        }

        wait_for_enter(input, "Press ENTER to continue:")?;
        self.session.advance()?;
        Ok(())
    }

    fn run_questionnaire(&mut self, input: &mut impl BufRead) -> Result<()> {
        println!(
            "\nWorkload questionnaire for the {} condition.",
            self.session.current_condition()
        );
        println!("Rate each dimension 0-100; ENTER keeps the default of 50.");

        let mut values = [50u8; 6];
        for (value, dimension) in values.iter_mut().zip(WORKLOAD_DIMENSIONS.iter()) {
            println!("\n{}: {}", dimension.title, dimension.question);
            println!(
                "  (0 = {}, 100 = {})",
                dimension.low_anchor, dimension.high_anchor
            );
            *value = read_rating(input)?;
        }

        self.session.submit_questionnaire(WorkloadRatings {
            mental_demand: values[0],
            physical_demand: values[1],
            temporal_demand: values[2],
            performance: values[3],
            effort: values[4],
            frustration: values[5],
        })?;
        Ok(())
    }

    fn run_transition(&mut self, input: &mut impl BufRead) -> Result<()> {
        match self.session.next_condition(self.session.current_condition())? {
            Some(next) => println!("\nNext up: the {next} condition."),
            None => println!("\nThat was the last condition."),
        }
        wait_for_enter(input, "Press ENTER when you are ready:")?;
        self.session.acknowledge_transition()?;
        Ok(())
    }

    fn export_results(self) -> Result<()> {
        let primary = DirSink::new(self.out_dir);
        let mirror = self.mirror_dir.map(DirSink::new);
        let (trials, workloads) = self.session.into_logs();
        let rows = aggregate(&trials, &workloads);
        pinex_report::export(
            &rows,
            &primary,
            mirror.as_ref().map(|sink| sink as &dyn FileSink),
        )
        .context("failed to export study data")?;
        Ok(())
    }
}

fn wait_for_enter(input: &mut impl BufRead, prompt: &str) -> Result<()> {
    print!("{prompt} ");
    io::stdout().flush()?;
    read_line(input).map(|_| ())
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    anyhow::ensure!(read > 0, "input closed before the session finished");
    Ok(line.trim().to_string())
}

fn read_rating(input: &mut impl BufRead) -> Result<u8> {
    loop {
        print!("Rating [50]: ");
        io::stdout().flush()?;
        let raw = read_line(input)?;
        if raw.is_empty() {
            return Ok(50);
        }
        match raw.parse::<u8>() {
            Ok(value) if value <= 100 => return Ok(value),
            _ => println!("Enter a whole number between 0 and 100."),
        }
    }
}
