//! Line-oriented terminal front end for the edit view.
//!
//! Prompts each field with its current value, offers the department choices by
//! number, and submits. A failed submit keeps the form so the user can edit
//! again.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::api::RecordStore;
use crate::models::Department;
use crate::view::{EditView, FormField, Navigator, Notifier, Route, SubmitOutcome, ViewState};

/// Input that cancels the edit.
const CANCEL: &str = "q";
/// Input that clears an optional field.
const CLEAR: &str = "-";
/// Prefix that makes the rest of the line a literal value, e.g. `\q`.
const ESCAPE: char = '\\';

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Saved(Route),
    Cancelled,
    NotFound,
    /// Input closed before the edit finished
    Closed,
}

/// What to do after a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Cancel,
    Closed,
}

/// Writes alerts to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Logs navigation; the terminal has no other pages to show.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn push(&self, route: Route) {
        tracing::info!("Navigating to {}", route);
    }
}

/// Drives one edit session over a line reader and a writer.
pub struct TerminalSession<R, W> {
    input: R,
    output: W,
}

impl<R, W> TerminalSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run<S, N, A>(
        &mut self,
        view: &mut EditView<S, N, A>,
        id: &str,
    ) -> io::Result<SessionEnd>
    where
        S: RecordStore,
        N: Navigator,
        A: Notifier,
    {
        self.render(view).await?;
        view.load(id).await;
        if view.state() == ViewState::NotFound {
            self.render(view).await?;
            return Ok(SessionEnd::NotFound);
        }

        self.write(&format!(
            "Edit Student {}\nEnter keeps a value, '{}' clears it, '{}' cancels, '{}' enters the rest literally.\n",
            view.id(),
            CLEAR,
            CANCEL,
            ESCAPE
        ))
        .await?;

        loop {
            for field in FormField::ALL {
                let flow = self.prompt_field(view, field).await?;
                if flow != Flow::Next {
                    return self.stop(view, flow).await;
                }
            }
            let flow = self.prompt_department(view).await?;
            if flow != Flow::Next {
                return self.stop(view, flow).await;
            }

            match view.submit().await {
                SubmitOutcome::Saved(route) => {
                    self.write(&format!("Saved. Opening {}\n", route)).await?;
                    return Ok(SessionEnd::Saved(route));
                }
                SubmitOutcome::Failed(_) => {
                    let flow = self.confirm("Edit again? [Y/n]: ").await?;
                    if flow != Flow::Next {
                        return self.stop(view, flow).await;
                    }
                }
                SubmitOutcome::MissingRequired(fields) => {
                    let labels: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                    self.write(&format!("Please fill in: {}\n", labels.join(", ")))
                        .await?;
                }
                SubmitOutcome::NotReady => {
                    self.render(view).await?;
                    return Ok(SessionEnd::NotFound);
                }
            }
        }
    }

    async fn render<S, N, A>(&mut self, view: &EditView<S, N, A>) -> io::Result<()>
    where
        S: RecordStore,
        N: Navigator,
        A: Notifier,
    {
        match view.state().placeholder() {
            Some(text) => self.write(&format!("{}\n", text)).await,
            None => Ok(()),
        }
    }

    async fn prompt_field<S, N, A>(
        &mut self,
        view: &mut EditView<S, N, A>,
        field: FormField,
    ) -> io::Result<Flow>
    where
        S: RecordStore,
        N: Navigator,
        A: Notifier,
    {
        let marker = if field.is_required() { "*" } else { "" };
        let prompt = format!("{}{} [{}]: ", field.label(), marker, view.form().get(field));
        let Some(line) = self.ask(&prompt).await? else {
            return Ok(Flow::Closed);
        };

        match line.trim() {
            CANCEL => return Ok(Flow::Cancel),
            "" => {}
            CLEAR => view.set_field(field, ""),
            _ => view.set_field(field, line.strip_prefix(ESCAPE).unwrap_or(&line)),
        }
        Ok(Flow::Next)
    }

    async fn prompt_department<S, N, A>(&mut self, view: &mut EditView<S, N, A>) -> io::Result<Flow>
    where
        S: RecordStore,
        N: Navigator,
        A: Notifier,
    {
        let mut menu = String::new();
        for (i, dept) in Department::ALL.iter().enumerate() {
            menu.push_str(&format!("  {}) {}\n", i + 1, dept));
        }
        self.write(&menu).await?;

        loop {
            let prompt = format!("Department [{}]: ", view.department());
            let Some(line) = self.ask(&prompt).await? else {
                return Ok(Flow::Closed);
            };

            let choice = line.trim();
            if choice == CANCEL {
                return Ok(Flow::Cancel);
            }
            if choice.is_empty() {
                return Ok(Flow::Next);
            }
            let picked = match choice.parse::<usize>() {
                Ok(n) => n
                    .checked_sub(1)
                    .and_then(|i| Department::ALL.get(i).copied()),
                Err(_) => Department::from_str(choice),
            };
            match picked {
                Some(dept) => {
                    view.select_department(dept);
                    return Ok(Flow::Next);
                }
                None => {
                    self.write(&format!("Choose 1-{}\n", Department::ALL.len()))
                        .await?
                }
            }
        }
    }

    async fn confirm(&mut self, prompt: &str) -> io::Result<Flow> {
        Ok(match self.ask(prompt).await?.as_deref().map(str::trim) {
            None => Flow::Closed,
            Some("") | Some("y") | Some("Y") => Flow::Next,
            Some(_) => Flow::Cancel,
        })
    }

    /// End the session early. Only an explicit cancel leaves for the listing.
    async fn stop<S, N, A>(
        &mut self,
        view: &EditView<S, N, A>,
        flow: Flow,
    ) -> io::Result<SessionEnd>
    where
        S: RecordStore,
        N: Navigator,
        A: Notifier,
    {
        if flow == Flow::Closed {
            return Ok(SessionEnd::Closed);
        }
        view.cancel();
        self.write("Cancelled.\n").await?;
        Ok(SessionEnd::Cancelled)
    }

    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.write(prompt).await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}
