//! Interactive editing shell
//!
//! Each line is one command. Commands that change the quiz go through the
//! edit session, which redraws the form through its observer.

use super::{describe_export, describe_print, incomplete_records};
use crate::config::Config;
use crate::view;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use quizsheet_compiler_html::{CompileOptions, PreviewDocument};
use quizsheet_editor::{
    parse_option_label, ChangeEvent, EditSession, Mutation, Observer, TextField, MAX_RECORDS,
};
use quizsheet_vision::{
    ChromeCapture, Exporter, PageCapture, PrintLayout, PrintSpooler, Printer,
};
use std::io::{BufRead, Write};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Output file for `pdf` (overrides config)
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

const HELP: &str = "\
Commands:
  question <text>       set the question text
  option <A-D> <text>   set an answer option
  answer <A-D>          mark the correct option
  explain <text>        set the explanation (empty to remove)
  add                   add a question (at most 5)
  remove <n>            remove question n
  select <n>            edit question n
  preview               show the preview (current question must be complete)
  hide                  hide the preview
  clear                 reset everything
  pdf                   export the preview to PDF
  print                 print the preview
  show                  redraw the form
  help                  show this help
  quit                  leave";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Apply(Mutation),
    Preview,
    Hide,
    Clear,
    Pdf,
    Print,
    Show,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "question" | "q" => ShellCommand::Apply(Mutation::EditField {
            field: TextField::Question,
            value: rest.to_string(),
        }),
        "explain" | "e" => ShellCommand::Apply(Mutation::EditField {
            field: TextField::Explanation,
            value: rest.to_string(),
        }),
        "option" | "o" => {
            let (label, text) = match rest.split_once(char::is_whitespace) {
                Some((label, text)) => (label, text.trim()),
                None => (rest, ""),
            };
            ShellCommand::Apply(Mutation::EditOption {
                index: option_index(label)?,
                value: text.to_string(),
            })
        }
        "answer" | "a" => ShellCommand::Apply(Mutation::SetCorrectAnswer {
            value: option_index(rest)?,
        }),
        "add" => ShellCommand::Apply(Mutation::AddRecord),
        "remove" | "rm" => ShellCommand::Apply(Mutation::RemoveRecord {
            index: record_index(rest)?,
        }),
        "select" | "s" => ShellCommand::Apply(Mutation::Select {
            index: record_index(rest)?,
        }),
        "preview" => ShellCommand::Preview,
        "hide" => ShellCommand::Hide,
        "clear" => ShellCommand::Clear,
        "pdf" => ShellCommand::Pdf,
        "print" => ShellCommand::Print,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(format!(
                "Unknown command: {}. Type 'help' for a list of commands.",
                other
            ))
        }
    };

    Ok(Some(command))
}

fn option_index(label: &str) -> Result<usize, String> {
    parse_option_label(label).ok_or_else(|| format!("Expected an option letter A-D, got '{}'", label))
}

/// Question numbers are typed 1-based
fn record_index(number: &str) -> Result<usize, String> {
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a question number starting at 1, got '{}'", number)),
    }
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Redraws the form after every applied mutation
pub struct Redraw<W> {
    out: W,
}

impl<W: Write> Redraw<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Observer for Redraw<W> {
    fn on_change(&mut self, event: &ChangeEvent<'_>) {
        let _ = write!(self.out, "{}", view::render(event.collection));
        let _ = self.out.flush();
    }
}

pub struct Shell<C, L, S> {
    session: EditSession,
    exporter: Exporter<C>,
    printer: Printer<L, S>,
}

impl<C, L, S> Shell<C, L, S>
where
    C: PageCapture,
    L: PrintLayout,
    S: PrintSpooler,
{
    pub fn new(session: EditSession, exporter: Exporter<C>, printer: Printer<L, S>) -> Self {
        Self {
            session,
            exporter,
            printer,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Read commands until `quit` or end of input
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{}", view::render(self.session.collection()))?;
        writeln!(out, "{}", "Type 'help' for a list of commands.".dimmed())?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else { break };
            let line = line?;

            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(ShellCommand::Clear)) => {
                    write!(out, "Clear all questions? [y/N] ")?;
                    out.flush()?;
                    let answer = lines.next().transpose()?.unwrap_or_default();
                    if confirmed(&answer) {
                        self.apply(Mutation::ClearAll, out)?;
                    } else {
                        writeln!(out, "Kept all questions.")?;
                    }
                }
                Ok(Some(command)) => self.execute(command, out).await?,
                Err(message) => writeln!(out, "{}", message.red())?,
            }
        }

        Ok(())
    }

    /// Run one command other than `quit` or `clear`
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<()> {
        match command {
            ShellCommand::Apply(mutation) => self.apply(mutation, out)?,

            ShellCommand::Preview => {
                if self.session.collection().is_active_complete() {
                    self.apply(Mutation::SetPreviewVisible { visible: true }, out)?;
                } else {
                    writeln!(
                        out,
                        "{}",
                        "Fill in the question and all four options before previewing.".yellow()
                    )?;
                }
            }

            ShellCommand::Hide => self.apply(Mutation::SetPreviewVisible { visible: false }, out)?,

            ShellCommand::Pdf => {
                if let Some(preview) = self.ready_preview(out)? {
                    let outcome = self
                        .exporter
                        .export_pdf(Some(&preview), &CancellationToken::new())
                        .await;
                    writeln!(out, "{}", describe_export(&outcome))?;
                }
            }

            ShellCommand::Print => {
                if let Some(preview) = self.ready_preview(out)? {
                    let outcome = self.printer.print(Some(&preview)).await;
                    writeln!(out, "{}", describe_print(&outcome))?;
                }
            }

            ShellCommand::Show => write!(out, "{}", view::render(self.session.collection()))?,
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Clear => self.apply(Mutation::ClearAll, out)?,
            ShellCommand::Quit => {}
        }

        Ok(())
    }

    fn apply<W: Write>(&mut self, mutation: Mutation, out: &mut W) -> std::io::Result<()> {
        let name = mutation.name();
        match self.session.apply(mutation) {
            Ok(result) if result.applied => Ok(()),
            Ok(_) => {
                debug!(mutation = name, "mutation was a no-op");
                let message = match name {
                    "add_record" => format!("A quiz holds at most {} questions.", MAX_RECORDS),
                    "remove_record" => "The last question cannot be removed.".to_string(),
                    _ => "Nothing changed.".to_string(),
                };
                writeln!(out, "{}", message.yellow())
            }
            Err(e) => writeln!(out, "{}", e.to_string().red()),
        }
    }

    /// The preview to export or print, or `None` after telling the user why not
    fn ready_preview<W: Write>(&self, out: &mut W) -> Result<Option<PreviewDocument>> {
        let collection = self.session.collection();

        if !collection.is_exportable() {
            let message = if !collection.preview_visible() {
                "Show the preview first (preview).".to_string()
            } else {
                let numbers: Vec<String> = incomplete_records(collection).iter().map(|n| n.to_string()).collect();
                format!("Complete every question first (incomplete: {}).", numbers.join(", "))
            };
            writeln!(out, "{}", message.yellow())?;
            return Ok(None);
        }

        Ok(PreviewDocument::from_collection(collection, CompileOptions::default())?)
    }
}

pub async fn edit(args: EditArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let mut options = config.export_options(cwd);
    if let Some(output) = args.output {
        options.output_path = cwd.join(output);
    }

    let mut session = EditSession::start();
    session.subscribe(Redraw::new(std::io::stdout()));

    let exporter = Exporter::new(ChromeCapture::new(), options);
    let printer = Printer::new(ChromeCapture::new(), config.spooler(), config.capture_options());
    let mut shell = Shell::new(session, exporter, printer);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    shell.run(stdin.lock(), &mut stdout).await?;

    let Shell { session, .. } = shell;
    session.end();
    Ok(())
}
