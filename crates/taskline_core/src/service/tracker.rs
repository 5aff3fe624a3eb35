//! Command dispatcher and exclusive owner of the task list.
//!
//! # Responsibility
//! - Validate each command's payload against its grammar.
//! - Invoke task/list operations and produce one response string per input.
//! - Write through to the store after every mutating operation.
//!
//! # Invariants
//! - Errors are caught at this boundary and rendered verbatim as responses;
//!   no error is fatal to the command loop.
//! - A failed save degrades to in-memory-only state plus a warning line,
//!   never an aborted command.
//! - A missing or corrupt store at startup yields an empty list, not a
//!   startup failure.

use crate::command::parser::{parse_command, CommandData, CommandKind};
use crate::error::{DomainError, FormatError, TasklineResult};
use crate::model::date_time::DateTimeValue;
use crate::model::task::{SnoozeOutcome, SnoozeUnit, Task};
use crate::model::task_list::TaskList;
use crate::storage::file_store::TaskStore;
use log::{info, warn};

const DEFAULT_SNOOZE_MINUTES: u32 = 30;

/// Dispatcher/controller owning the task list and the store.
pub struct Tracker<S: TaskStore> {
    tasks: TaskList,
    store: S,
}

impl<S: TaskStore> Tracker<S> {
    /// Opens a tracker, rehydrating the task list from the store.
    ///
    /// A missing store starts empty; a corrupt one is logged and also starts
    /// empty rather than failing startup.
    pub fn open(store: S) -> Self {
        let tasks = match store.load() {
            Ok(Some(records)) => match decode_records(&records) {
                Ok(tasks) => {
                    info!(
                        "event=store_loaded module=service status=ok tasks={}",
                        tasks.len()
                    );
                    tasks
                }
                Err(message) => {
                    warn!("event=store_corrupt module=service status=error error={message}");
                    TaskList::new()
                }
            },
            Ok(None) => {
                info!("event=store_missing module=service status=ok");
                TaskList::new()
            }
            Err(err) => {
                warn!("event=store_load_failed module=service status=error error={err}");
                TaskList::new()
            }
        };
        Self { tasks, store }
    }

    /// Read-only view of the current task list.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Handles one raw input line and returns the response string.
    ///
    /// Never writes to any output device; the caller owns presentation.
    pub fn handle(&mut self, input: &str) -> String {
        let command = parse_command(input);
        match self.execute(&command) {
            Ok(response) => response,
            Err(err) => err.to_string(),
        }
    }

    fn execute(&mut self, command: &CommandData) -> TasklineResult<String> {
        match command.kind {
            CommandKind::Help => Ok(help_text()),
            CommandKind::Now => Ok(format!("It is now {}.", DateTimeValue::now())),
            CommandKind::Bye => Ok("Bye! Your tasks are saved. See you soon.".to_string()),
            CommandKind::Clear => self.clear(),
            CommandKind::List => self.list(),
            CommandKind::Occurring => self.occurring(&command.raw),
            CommandKind::Find => self.find(&command.raw),
            CommandKind::Mark => self.mark(&command.raw),
            CommandKind::Unmark => self.unmark(&command.raw),
            CommandKind::Delete => self.delete(&command.raw),
            CommandKind::Snooze => self.snooze(&command.raw),
            CommandKind::Add => self.add(&command.raw),
        }
    }

    fn add(&mut self, raw: &str) -> TasklineResult<String> {
        let line = raw.trim();
        let first = line.split_whitespace().next().unwrap_or("");
        let rest = payload(line);
        let task = match first.to_ascii_lowercase().as_str() {
            "todo" => Task::todo(rest)?,
            "deadline" => {
                let (description, due) = rest
                    .split_once(" /by ")
                    .ok_or(DomainError::MissingDeadline)?;
                Task::deadline(description, due.trim())?
            }
            "event" => {
                let segments: Vec<&str> = rest.split(" /").collect();
                if segments.len() != 3 {
                    return Err(DomainError::MissingEventTimes.into());
                }
                let start = segments[1]
                    .strip_prefix("from")
                    .ok_or(DomainError::MissingEventTimes)?
                    .trim();
                let end = segments[2]
                    .strip_prefix("to")
                    .ok_or(DomainError::MissingEventTimes)?
                    .trim();
                if start.is_empty() {
                    return Err(DomainError::BlankEventBound { bound: "start" }.into());
                }
                if end.is_empty() {
                    return Err(DomainError::BlankEventBound { bound: "end" }.into());
                }
                Task::event(segments[0], start, end)?
            }
            other => return Err(DomainError::UnknownTaskType(other.to_string()).into()),
        };
        let rendered = task.to_string();
        self.tasks.add(task);
        info!(
            "event=task_added module=service status=ok size={}",
            self.tasks.len()
        );
        let mut response = format!(
            "Got it. I've added this task:\n  {rendered}\nNow you have {}.",
            count_phrase(self.tasks.len())
        );
        self.persist(&mut response);
        Ok(response)
    }

    fn list(&self) -> TasklineResult<String> {
        if self.tasks.is_empty() {
            return Err(DomainError::EmptyList.into());
        }
        Ok(format!(
            "Here are your tasks:\n{}",
            render_numbered(&self.tasks)
        ))
    }

    fn clear(&mut self) -> TasklineResult<String> {
        if self.tasks.is_empty() {
            return Ok("Nothing to clear; your list is already empty.".to_string());
        }
        self.tasks.clear();
        info!("event=list_cleared module=service status=ok");
        let mut response = "Cleared all tasks!".to_string();
        self.persist(&mut response);
        Ok(response)
    }

    fn mark(&mut self, raw: &str) -> TasklineResult<String> {
        let Some(index) = self.parse_index(raw)? else {
            return Ok(not_a_number_response("mark"));
        };
        let rendered = self.tasks.mark(index)?.to_string();
        info!("event=task_marked module=service status=ok index={index}");
        let mut response = format!("Nice! I've marked this task as done:\n  {rendered}");
        self.persist(&mut response);
        Ok(response)
    }

    fn unmark(&mut self, raw: &str) -> TasklineResult<String> {
        let Some(index) = self.parse_index(raw)? else {
            return Ok(not_a_number_response("unmark"));
        };
        let rendered = self.tasks.unmark(index)?.to_string();
        info!("event=task_unmarked module=service status=ok index={index}");
        let mut response = format!("Okay, this task is not done yet:\n  {rendered}");
        self.persist(&mut response);
        Ok(response)
    }

    fn delete(&mut self, raw: &str) -> TasklineResult<String> {
        let Some(index) = self.parse_index(raw)? else {
            return Ok(not_a_number_response("delete"));
        };
        let removed = self.tasks.remove(index)?;
        info!(
            "event=task_deleted module=service status=ok index={index} size={}",
            self.tasks.len()
        );
        let mut response = format!(
            "Noted. I've removed this task:\n  {removed}\nNow you have {}.",
            count_phrase(self.tasks.len())
        );
        self.persist(&mut response);
        Ok(response)
    }

    fn occurring(&self, raw: &str) -> TasklineResult<String> {
        let instant = DateTimeValue::parse(payload(raw))?;
        let matches = self.tasks.find_tasks_occurring_on(&instant);
        if matches.is_empty() {
            return Ok(format!("No tasks occurring on {instant}."));
        }
        Ok(format!(
            "Tasks occurring on {instant}:\n{}",
            render_numbered(&matches)
        ))
    }

    fn find(&self, raw: &str) -> TasklineResult<String> {
        let keyword = payload(raw);
        if keyword.is_empty() {
            return Err(FormatError::MissingKeyword.into());
        }
        let matches = self.tasks.find_tasks_with_keyword(keyword);
        if matches.is_empty() {
            return Ok(format!("No tasks matching `{keyword}`."));
        }
        Ok(format!(
            "Tasks matching `{keyword}`:\n{}",
            render_numbered(&matches)
        ))
    }

    fn snooze(&mut self, raw: &str) -> TasklineResult<String> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let (index_token, amount, unit) = match tokens.len() {
            2 => (tokens[1], DEFAULT_SNOOZE_MINUTES, SnoozeUnit::Minute),
            5 => {
                if tokens[2] != "/by" {
                    return Err(FormatError::MalformedSnooze.into());
                }
                let amount: u32 = tokens[3]
                    .parse()
                    .map_err(|_| FormatError::InvalidSnoozeAmount(tokens[3].to_string()))?;
                if amount == 0 {
                    return Err(FormatError::InvalidSnoozeAmount(tokens[3].to_string()).into());
                }
                (tokens[1], amount, SnoozeUnit::parse(tokens[4])?)
            }
            _ => return Err(FormatError::MalformedSnooze.into()),
        };
        let Some(index) = self.parse_index_token(index_token)? else {
            return Ok(not_a_number_response("snooze"));
        };
        let task = self.tasks.get_mut(index)?;
        let outcome = task.snooze(unit, amount)?;
        let rendered = task.to_string();
        match outcome {
            SnoozeOutcome::Moved => {
                info!(
                    "event=task_snoozed module=service status=ok index={index} amount={amount} unit={unit}"
                );
                let mut response = format!(
                    "Okay, I've pushed this task back by {amount} {unit}{}:\n  {rendered}",
                    plural(amount as usize)
                );
                self.persist(&mut response);
                Ok(response)
            }
            SnoozeOutcome::NoTemporalAnchor => Ok(format!(
                "This task has no date to move, so it stays put:\n  {rendered}"
            )),
        }
    }

    /// Extracts the single task-number argument of an index-taking command.
    ///
    /// `Ok(None)` means the token was present but not numeric; the caller
    /// decides the resulting message.
    fn parse_index(&self, raw: &str) -> TasklineResult<Option<usize>> {
        let args: Vec<&str> = raw.split_whitespace().skip(1).collect();
        if args.is_empty() {
            return Err(FormatError::MissingTaskNumber.into());
        }
        if args.len() > 1 {
            return Err(FormatError::TooManyArguments.into());
        }
        self.parse_index_token(args[0])
    }

    fn parse_index_token(&self, token: &str) -> TasklineResult<Option<usize>> {
        match token.parse::<i64>() {
            // The grammar is 1-based; the list is 0-based.
            Ok(n) if n >= 1 => Ok(Some((n - 1) as usize)),
            Ok(_) => {
                if self.tasks.is_empty() {
                    Err(DomainError::EmptyList.into())
                } else {
                    Err(DomainError::IndexOutOfRange {
                        size: self.tasks.len(),
                    }
                    .into())
                }
            }
            Err(_) => Ok(None),
        }
    }

    /// Write-through save after a mutating operation. A failure keeps the
    /// in-memory state and appends a warning line to the response.
    fn persist(&self, response: &mut String) {
        if let Err(err) = self.store.save(&self.tasks.to_records()) {
            warn!("event=store_save_failed module=service status=error error={err}");
            response.push_str("\nWarning: your tasks could not be saved; changes are in memory only.");
        }
    }
}

fn decode_records(records: &[String]) -> Result<TaskList, String> {
    let mut tasks = Vec::with_capacity(records.len());
    for (line_number, record) in records.iter().enumerate() {
        let task = Task::from_record(record)
            .map_err(|err| format!("line {}: {err}", line_number + 1))?;
        tasks.push(task);
    }
    Ok(TaskList::from_tasks(tasks))
}

fn payload(raw: &str) -> &str {
    match raw.trim().split_once(|c: char| c.is_whitespace()) {
        Some((_, rest)) => rest.trim(),
        None => "",
    }
}

fn render_numbered(tasks: &TaskList) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}.{task}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_phrase(count: usize) -> String {
    format!("{count} task{} in the list", plural(count))
}

fn not_a_number_response(command: &str) -> String {
    format!("That doesn't look like a task number. Try `{command} <n>`.")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn help_text() -> String {
    [
        "Here's what I understand:",
        "  todo <description>",
        "  deadline <description> /by <d/M/yyyy> <HHmm>",
        "  event <description> /from <d/M/yyyy> <HHmm> /to <d/M/yyyy> <HHmm>",
        "  list                      show all tasks",
        "  mark <n> / unmark <n>     flag a task done or not done",
        "  delete <n>                remove a task",
        "  find <keyword>            search task lines",
        "  occurring <d/M/yyyy> <HHmm>  tasks happening at that instant",
        "  snooze <n>                push a task back 30 minutes",
        "  snooze <n> /by <amount> <day|hour|minute>",
        "  now                       current date and time",
        "  clear                     remove every task",
        "  bye                       save and exit",
    ]
    .join("\n")
}
