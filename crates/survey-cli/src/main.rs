mod photos;
mod wizard;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use survey_spec::{
    AnswerKind, SurveySession, SurveySpec, build_screen_payload, jetsurvey, survey_schema,
};
use tracing::{Level, debug};

use photos::DirectoryPhotos;
use wizard::{Input, ScreenFormat, SurveyPresenter, Verbosity, parse_input};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Text-based survey driver",
    long_about = "Runs a linear survey session on stdin/stdout and inspects survey definitions"
)]
struct Cli {
    /// Log session activity to stderr.
    #[arg(long, global = true, alias = "debug")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SpecArgs {
    /// Path to a survey definition JSON file (defaults to the built-in survey).
    #[arg(long, value_name = "SPEC")]
    spec: Option<PathBuf>,
    /// Use the built-in survey including the unshipped questions.
    #[arg(long, conflicts_with = "spec")]
    extended: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a survey one question at a time.
    Run {
        #[command(flatten)]
        source: SpecArgs,
        /// Directory that receives captured photos.
        #[arg(long, value_name = "DIR")]
        photo_dir: Option<PathBuf>,
        /// Screen output format.
        #[arg(long, value_enum, default_value_t = ScreenFormat::Text)]
        format: ScreenFormat,
        /// Also emit answer JSON on completion.
        #[arg(long)]
        answers_json: bool,
    },
    /// Print a survey definition as JSON.
    Describe {
        #[command(flatten)]
        source: SpecArgs,
    },
    /// Print the JSON Schema for survey definition files.
    Schema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Run {
            source,
            photo_dir,
            format,
            answers_json,
        } => run_survey(&source, photo_dir, cli.verbose, answers_json, format),
        Command::Describe { source } => run_describe(&source),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&survey_schema())?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .try_init();
}

fn load_spec(source: &SpecArgs) -> CliResult<SurveySpec> {
    match &source.spec {
        Some(path) => load_spec_file(path),
        None if source.extended => Ok(jetsurvey::extended()),
        None => Ok(jetsurvey::survey()),
    }
}

fn load_spec_file(path: &Path) -> CliResult<SurveySpec> {
    let contents = fs::read_to_string(path)?;
    let spec = SurveySpec::from_json_str(&contents)?;
    debug!(path = %path.display(), survey = %spec.id, "loaded survey definition");
    Ok(spec)
}

fn run_describe(source: &SpecArgs) -> CliResult<()> {
    let spec = load_spec(source)?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

fn run_survey(
    source: &SpecArgs,
    photo_dir: Option<PathBuf>,
    verbose: bool,
    answers_json: bool,
    format: ScreenFormat,
) -> CliResult<()> {
    let spec = load_spec(source)?;
    let photo_dir = photo_dir.unwrap_or_else(|| std::env::temp_dir().join("survey-photos"));
    let mut session =
        SurveySession::new(spec)?.with_photo_provider(DirectoryPhotos::new(photo_dir));
    let mut presenter =
        SurveyPresenter::new(Verbosity::from_verbose(verbose), format, answers_json);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let payload = build_screen_payload(&session);
        presenter.show_header(&payload);
        presenter.show_screen(&payload);
        presenter.show_hint(session.current_question());
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Err("survey aborted: input closed".into());
        };
        let line = line?;
        let question = session.current_question();
        let question_id = question.id.clone();
        let kind = question.kind;

        let input = match parse_input(kind, &line) {
            Ok(input) => input,
            Err(err) => {
                presenter.show_parse_error(&err);
                continue;
            }
        };

        match input {
            Input::Exit => return Err("survey aborted by user".into()),
            Input::Back => {
                if !session.go_back() {
                    presenter.show_notice("Survey dismissed.");
                    return Ok(());
                }
            }
            Input::Previous => {
                if session.snapshot().show_previous {
                    session.go_to_previous();
                } else {
                    presenter.show_notice("Already at the first question.");
                }
            }
            Input::Next => {
                if session.snapshot().show_done {
                    presenter.show_notice("This is the last question; type 'done' to finish.");
                } else if !session.is_next_enabled() {
                    presenter.show_notice("Answer the question to continue.");
                } else {
                    session.go_next();
                }
            }
            Input::Done => {
                if !session.snapshot().show_done {
                    presenter.show_notice("'done' is only available on the last question.");
                } else if !session.is_next_enabled() {
                    presenter.show_notice("Answer the question to finish.");
                } else {
                    session.complete(|answers| presenter.show_completion(answers));
                    return Ok(());
                }
            }
            Input::Photo => {
                if kind != AnswerKind::Photo {
                    presenter.show_notice("This question does not take a photo.");
                    continue;
                }
                match session.new_photo_locator() {
                    Ok(locator) => {
                        presenter.show_notice(&format!("Photo saved to {}", locator));
                        session.set_photo_answer(&question_id, locator)?;
                    }
                    Err(err) => eprintln!("Failed to capture photo: {}", err),
                }
            }
            Input::Scalar(value) => session.set_scalar_answer(&question_id, value)?,
            Input::Toggle { value, selected } => {
                session.set_multi_answer(&question_id, value, selected)?
            }
        }
    }
}
