use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const LABEL_WIDTH: usize = 12;

/// Steps of the session that talk to the network or run the package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Search,
    Versions,
    Initialize,
    Install,
}

impl Step {
    fn running(self) -> &'static str {
        match self {
            Step::Search => "Searching",
            Step::Versions => "Fetching",
            Step::Initialize => "Initializing",
            Step::Install => "Installing",
        }
    }

    fn finished(self) -> &'static str {
        match self {
            Step::Search => "Searched",
            Step::Versions => "Fetched",
            Step::Initialize => "Initialized",
            Step::Install => "Installed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Running,
    Done,
    Note,
    Caution,
    Failed,
    Plain,
}

impl Tone {
    fn style(self) -> Option<Style> {
        let color = match self {
            Tone::Running => AnsiColor::Cyan,
            Tone::Done => AnsiColor::Green,
            Tone::Note => AnsiColor::Blue,
            Tone::Caution => AnsiColor::Yellow,
            Tone::Failed => AnsiColor::Red,
            Tone::Plain => return None,
        };
        Some(Style::new().bold().fg_color(Some(color.into())))
    }

    /// Problems go to stderr so stdout stays the conversation with the user
    fn to_stderr(self) -> bool {
        matches!(self, Tone::Caution | Tone::Failed)
    }
}

fn color_enabled(terminal: bool) -> bool {
    terminal && std::env::var_os("NO_COLOR").is_none()
}

/// Whether prompts written to stdout should be colored
pub(crate) fn stdout_color() -> bool {
    color_enabled(io::stdout().is_terminal())
}

/// Style for the `?` marker in front of prompt questions
pub(crate) fn prompt_style() -> Style {
    Style::new().bold().fg_color(Some(AnsiColor::Green.into()))
}

/// Style for choices that cannot be picked
pub(crate) fn disabled_style() -> Style {
    Style::new().dimmed()
}

/// Label right-aligned in its column, continuation lines indented under the message
fn render(label: &str, message: &str, style: Option<Style>) -> String {
    let mut rendered = String::new();
    for (idx, line) in message.lines().enumerate() {
        let column = if idx == 0 { label } else { "" };
        let column = format!("{column:>width$}", width = LABEL_WIDTH);
        match style {
            Some(style) if idx == 0 => {
                rendered.push_str(&format!("{}{column}{} {line}\n", style.render(), style.render_reset()))
            }
            _ => rendered.push_str(&format!("{column} {line}\n")),
        }
    }
    rendered
}

fn emit(tone: Tone, label: &str, message: &str) {
    let (terminal, mut handle): (bool, Box<dyn Write>) = if tone.to_stderr() {
        (io::stderr().is_terminal(), Box::new(io::stderr().lock()))
    } else {
        (io::stdout().is_terminal(), Box::new(io::stdout().lock()))
    };
    let style = tone.style().filter(|_| color_enabled(terminal));

    let _ = handle.write_all(render(label, message, style).as_bytes());
    let _ = handle.flush();
}

/// Short human form: `850ms`, `2.4s`, `3m 07s`
fn elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else if duration.as_millis() >= 1000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

pub fn info(message: impl Display) {
    emit(Tone::Note, "Info", &message.to_string());
}

pub fn warn(message: impl Display) {
    emit(Tone::Caution, "Warning", &message.to_string());
}

pub fn success(label: &str, message: impl Display) {
    emit(Tone::Done, label, &message.to_string());
}

/// Raw command output, indented under the label column
pub fn output(text: &str) {
    let text = text.trim_end();
    if !text.is_empty() {
        emit(Tone::Plain, "", text);
    }
}

/// A running [`Step`]; consumed by reporting how it ended
#[must_use]
pub struct Activity {
    step: Step,
    subject: String,
    started: Instant,
}

impl Activity {
    pub fn start(step: Step, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        emit(Tone::Running, step.running(), &subject);
        Self {
            step,
            subject,
            started: Instant::now(),
        }
    }

    /// `detail` is appended to the subject when not empty
    pub fn done(self, detail: impl Display) {
        let detail = detail.to_string();
        let mut message = self.subject;
        if !detail.is_empty() {
            message = format!("{message} {detail}");
        }
        let message = format!("{message} in {}", elapsed(self.started.elapsed()));
        emit(Tone::Done, self.step.finished(), &message);
    }

    pub fn failed(self, error: impl Display) {
        let message = format!(
            "{} after {}: {error}",
            self.subject,
            elapsed(self.started.elapsed())
        );
        emit(Tone::Failed, "Failed", &message);
    }
}
