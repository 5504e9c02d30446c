//! Interactive bedtime form.
//!
//! Reads one command per line and reprints the form after every change,
//! the same way the on-screen form recomputes as controls move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use betterrest_core::{
    Bedtime, BedtimeForm, BedtimeInputs, BedtimePredictor, ClockStyle, Config, ModelProvider,
    ModelSource, WakeTime,
};

#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Model artifact to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
}

const HELP: &str = "\
commands:
  wake HH:MM        set wake-up time
  sleep H | + | -   set or step desired sleep
  coffee N | + | -  set or step daily coffee cups
  pick I            choose coffee picker row (0 = 1 cup)
  show              print the form
  ok                dismiss the error
  help              show this help
  quit              leave
";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Adjust<T> {
    Set(T),
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FormCommand {
    Wake(WakeTime),
    Sleep(Adjust<f64>),
    Coffee(Adjust<u32>),
    Pick(usize),
    Show,
    Dismiss,
    Help,
    Quit,
}

fn parse_adjust<T>(arg: Option<&str>, what: &str) -> Result<Adjust<T>, String>
where
    T: std::str::FromStr,
{
    match arg {
        Some("+") => Ok(Adjust::Up),
        Some("-") => Ok(Adjust::Down),
        Some(value) => value
            .parse()
            .map(Adjust::Set)
            .map_err(|_| format!("cannot parse '{value}' as {what}")),
        None => Err(format!("missing {what}")),
    }
}

fn parse_command(line: &str) -> Result<Option<FormCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match verb.to_lowercase().as_str() {
        "wake" => {
            let value = arg.ok_or("missing wake time")?;
            FormCommand::Wake(value.parse().map_err(|e| format!("{e}"))?)
        }
        "sleep" => FormCommand::Sleep(parse_adjust(arg, "hours")?),
        "coffee" => FormCommand::Coffee(parse_adjust(arg, "cups")?),
        "pick" => {
            let value = arg.ok_or("missing picker row")?;
            FormCommand::Pick(
                value
                    .parse()
                    .map_err(|_| format!("cannot parse '{value}' as picker row"))?,
            )
        }
        "show" => FormCommand::Show,
        "ok" => FormCommand::Dismiss,
        "help" | "?" => FormCommand::Help,
        "quit" | "exit" | "q" => FormCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Render the form sections as text.
pub fn render_form(
    inputs: &BedtimeInputs,
    bedtime: Option<Bedtime>,
    clock: ClockStyle,
) -> String {
    let bedtime = bedtime
        .map(|b| b.format_short(clock))
        .unwrap_or_else(|| "--:--".to_string());
    format!(
        "Desired wake up time: {}\n\
         Desired amount of sleep: {}\n\
         Daily coffee intake: {}\n\
         Recommended sleep time: {}\n",
        inputs.wake_time, inputs.sleep_amount, inputs.coffee_amount, bedtime
    )
}

fn render<P: ModelProvider, W: Write>(
    form: &BedtimeForm<P>,
    out: &mut W,
    clock: ClockStyle,
) -> io::Result<()> {
    write!(out, "{}", render_form(form.inputs(), form.bedtime(), clock))?;
    let alert = form.alert();
    if alert.visible {
        writeln!(out, "{}", alert.title)?;
        writeln!(out, "{}", alert.message)?;
        writeln!(out, "(type 'ok' to dismiss)")?;
    }
    Ok(())
}

/// Drive a form from line-based input until `quit` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily and reported like any
/// other unrecognised command.
pub fn run_session<P, R, W>(
    form: &mut BedtimeForm<P>,
    mut input: R,
    mut out: W,
    clock: ClockStyle,
) -> io::Result<()>
where
    P: ModelProvider,
    R: BufRead,
    W: Write,
{
    render(form, &mut out, clock)?;
    write!(out, "> ")?;
    out.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            Err(message) => {
                writeln!(out, "{message}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
        };
        tracing::debug!(?command, "form command");

        match command {
            FormCommand::Wake(wake) => form.set_wake_time(wake),
            FormCommand::Sleep(Adjust::Set(hours)) => form.set_sleep_amount(hours),
            FormCommand::Sleep(Adjust::Up) => form.increment_sleep(),
            FormCommand::Sleep(Adjust::Down) => form.decrement_sleep(),
            FormCommand::Coffee(Adjust::Set(cups)) => form.set_coffee_amount(cups),
            FormCommand::Coffee(Adjust::Up) => form.increment_coffee(),
            FormCommand::Coffee(Adjust::Down) => form.decrement_coffee(),
            FormCommand::Pick(index) => form.select_coffee_index(index),
            FormCommand::Dismiss => form.dismiss_alert(),
            FormCommand::Show => {}
            FormCommand::Help => {
                write!(out, "{HELP}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            FormCommand::Quit => return Ok(()),
        }

        render(form, &mut out, clock)?;
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn run(args: FormArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let source = args
        .model
        .map(ModelSource::Artifact)
        .unwrap_or_else(|| config.model_source());
    let mut form = BedtimeForm::with_inputs(BedtimePredictor::new(source), config.inputs()?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut form, stdin.lock(), stdout.lock(), config.display.clock)?;
    Ok(())
}
