use std::fmt::Write;

use survey_spec::{AnswerKind, AnswerSet, QuestionSpec, ScreenPayload, render_json_ui, render_text};

/// Controls which bits of state the driver prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question screens only.
    Clean,
    /// Verbose output: progress counters and help text as well.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// How each screen is printed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ScreenFormat {
    Text,
    Json,
}

/// Prints survey screens and completion output.
pub struct SurveyPresenter {
    verbosity: Verbosity,
    format: ScreenFormat,
    header_printed: bool,
    show_answers_json: bool,
}

impl SurveyPresenter {
    pub fn new(verbosity: Verbosity, format: ScreenFormat, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            format,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self, payload: &ScreenPayload) {
        if self.header_printed {
            return;
        }
        println!("Survey: {}", payload.survey_title);
        if self.verbosity.is_verbose()
            && let Some(help) = &payload.help
        {
            println!("Help: {}", help);
        }
        self.header_printed = true;
    }

    pub fn show_screen(&self, payload: &ScreenPayload) {
        match self.format {
            ScreenFormat::Text => println!("{}", render_text(payload)),
            ScreenFormat::Json => println!("{}", render_json_ui(payload)),
        }
        if self.verbosity.is_verbose() {
            println!(
                "Progress: {}/{} answered",
                payload.progress.answered, payload.progress.total
            );
        }
    }

    pub fn show_hint(&self, question: &QuestionSpec) {
        println!("{}", input_hint(question.kind));
    }

    pub fn show_notice(&self, message: &str) {
        println!("{}", message);
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, answer_set: &AnswerSet) {
        println!("Done ✅");
        match answer_set.to_cbor() {
            Ok(bytes) => {
                println!("Answers (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize answers to CBOR: {}", err);
            }
        }
        if self.show_answers_json {
            match answer_set.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize answers to JSON: {}", err);
                }
            }
        }
    }
}

/// One line of driver input, interpreted against the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Next,
    Previous,
    Back,
    Done,
    Photo,
    Exit,
    Scalar(f64),
    Toggle { value: i64, selected: bool },
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

pub fn parse_input(kind: AnswerKind, raw: &str) -> Result<Input, AnswerParseError> {
    let trimmed = raw.trim();
    let command = match trimmed.to_ascii_lowercase().as_str() {
        "n" | "next" => Some(Input::Next),
        "p" | "prev" | "previous" => Some(Input::Previous),
        "b" | "back" => Some(Input::Back),
        "d" | "done" => Some(Input::Done),
        "exit" | "quit" => Some(Input::Exit),
        "photo" => Some(Input::Photo),
        _ => None,
    };
    if let Some(command) = command {
        return Ok(command);
    }

    match kind {
        AnswerKind::Scalar => parse_scalar(trimmed),
        AnswerKind::MultiSelect => parse_toggle(trimmed),
        AnswerKind::Photo => Err(AnswerParseError::new(
            "Type 'photo' to capture a picture.",
            Some("photo command".to_string()),
        )),
    }
}

fn parse_scalar(raw: &str) -> Result<Input, AnswerParseError> {
    raw.parse::<f64>()
        .map_err(|_| {
            AnswerParseError::new(
                "Please enter a number.",
                Some("expected number".to_string()),
            )
        })
        .and_then(|value| {
            if value.is_finite() {
                Ok(Input::Scalar(value))
            } else {
                Err(AnswerParseError::new(
                    "Please enter a finite number.",
                    Some("number must be finite".to_string()),
                ))
            }
        })
}

fn parse_toggle(raw: &str) -> Result<Input, AnswerParseError> {
    let (selected, digits) = match raw.chars().next() {
        Some('+') => (true, &raw[1..]),
        Some('-') => (false, &raw[1..]),
        _ => (true, raw),
    };
    digits
        .trim()
        .parse::<i64>()
        .map(|value| Input::Toggle { value, selected })
        .map_err(|_| {
            AnswerParseError::new(
                "Use +N to select option N or -N to clear it.",
                Some("expected +N or -N".to_string()),
            )
        })
}

fn input_hint(kind: AnswerKind) -> &'static str {
    match kind {
        AnswerKind::Scalar => "(number, or next/previous/back/done/exit)",
        AnswerKind::MultiSelect => "(+N select, -N clear, or next/previous/back/done/exit)",
        AnswerKind::Photo => "(photo, or next/previous/back/done/exit)",
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
