use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use taskline_core::{StoreResult, TaskKind, TaskStore, Tracker};

/// In-memory store standing in for the task file; `records` is shared so
/// tests can inspect what the tracker persisted.
#[derive(Default)]
struct MemoryTaskStore {
    records: Rc<RefCell<Option<Vec<String>>>>,
    fail_saves: bool,
}

impl TaskStore for MemoryTaskStore {
    fn load(&self) -> StoreResult<Option<Vec<String>>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[String]) -> StoreResult<()> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only").into());
        }
        *self.records.borrow_mut() = Some(records.to_vec());
        Ok(())
    }
}

fn empty_tracker() -> Tracker<MemoryTaskStore> {
    Tracker::open(MemoryTaskStore::default())
}

#[test]
fn todo_then_list_shows_one_undone_line() {
    let mut tracker = empty_tracker();

    let added = tracker.handle("todo buy milk");
    assert!(added.contains("buy milk"));
    assert!(added.contains("1 task in the list"));

    let listed = tracker.handle("list");
    assert!(listed.contains("1.[T][ ] buy milk"));
}

#[test]
fn default_snooze_advances_deadline_thirty_minutes() {
    let mut tracker = empty_tracker();
    tracker.handle("deadline submit report /by 1/10/2024 1700");

    let response = tracker.handle("snooze 1");
    assert!(response.contains("30 minutes"));

    match tracker.tasks().get(0).unwrap().kind() {
        TaskKind::Deadline { due } => assert_eq!(due.to_persisted_string(), "1/10/2024 1730"),
        other => panic!("expected deadline kind, got {other:?}"),
    }
}

#[test]
fn snooze_by_days_moves_date_only() {
    let mut tracker = empty_tracker();
    tracker.handle("deadline submit report /by 1/10/2024 1700");

    tracker.handle("snooze 1 /by 2 days");

    match tracker.tasks().get(0).unwrap().kind() {
        TaskKind::Deadline { due } => assert_eq!(due.to_persisted_string(), "3/10/2024 1700"),
        other => panic!("expected deadline kind, got {other:?}"),
    }
}

#[test]
fn snooze_todo_reports_missing_anchor_without_failing() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");

    let response = tracker.handle("snooze 1");
    assert!(response.contains("no date to move"));
}

#[test]
fn snooze_rejects_bad_shapes_and_units() {
    let mut tracker = empty_tracker();
    tracker.handle("deadline submit report /by 1/10/2024 1700");

    assert!(tracker.handle("snooze 1 /by 2").contains("snooze <n>"));
    assert!(tracker.handle("snooze 1 by 2 days").contains("snooze <n>"));
    assert!(tracker.handle("snooze 1 /by 0 days").contains("positive whole number"));
    assert!(tracker.handle("snooze 1 /by two days").contains("positive whole number"));
    assert!(tracker.handle("snooze 1 /by 2 weeks").contains("Unknown unit"));
}

#[test]
fn oversized_snooze_is_a_response_not_a_crash() {
    let mut tracker = empty_tracker();
    tracker.handle("deadline submit report /by 1/10/2024 1700");

    let response = tracker.handle("snooze 1 /by 4000000000 days");
    assert!(response.contains("smaller amount"));

    // The task is untouched and the command loop keeps working.
    match tracker.tasks().get(0).unwrap().kind() {
        TaskKind::Deadline { due } => assert_eq!(due.to_persisted_string(), "1/10/2024 1700"),
        other => panic!("expected deadline kind, got {other:?}"),
    }
    assert!(tracker.handle("list").contains("submit report"));
}

#[test]
fn mark_on_empty_list_is_the_empty_list_error() {
    let mut tracker = empty_tracker();
    let response = tracker.handle("mark 1");
    assert_eq!(response, "You don't have any tasks yet.");
}

#[test]
fn out_of_range_mark_reports_live_size() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");

    let response = tracker.handle("mark 5");
    assert!(response.contains("only have 1 task"));
}

#[test]
fn index_argument_validation() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");

    assert!(tracker.handle("mark").contains("Which task"));
    assert!(tracker.handle("mark 1 2").contains("exactly one task number"));
    assert!(tracker
        .handle("mark one")
        .contains("doesn't look like a task number"));
}

#[test]
fn mark_then_unmark_round_trip() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");

    let marked = tracker.handle("mark 1");
    assert!(marked.contains("[T][X] buy milk"));

    let unmarked = tracker.handle("unmark 1");
    assert!(unmarked.contains("[T][ ] buy milk"));
}

#[test]
fn delete_removes_and_renumbers() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");
    tracker.handle("todo water plants");

    let response = tracker.handle("delete 1");
    assert!(response.contains("buy milk"));
    assert!(response.contains("1 task in the list"));

    let listed = tracker.handle("list");
    assert!(listed.contains("1.[T][ ] water plants"));
}

#[test]
fn list_on_empty_tracker_is_an_error_message() {
    let mut tracker = empty_tracker();
    assert_eq!(tracker.handle("list"), "You don't have any tasks yet.");
}

#[test]
fn clear_distinguishes_already_empty() {
    let mut tracker = empty_tracker();
    assert!(tracker.handle("clear").contains("already empty"));

    tracker.handle("todo buy milk");
    assert_eq!(tracker.handle("clear"), "Cleared all tasks!");
    assert!(tracker.tasks().is_empty());
}

#[test]
fn occurring_queries_the_event_interval() {
    let mut tracker = empty_tracker();
    tracker.handle("event conference /from 1/10/2024 0900 /to 1/10/2024 1700");

    let inside = tracker.handle("occurring 1/10/2024 1200");
    assert!(inside.contains("conference"));

    let outside = tracker.handle("occurring 1/10/2024 1701");
    assert!(outside.contains("No tasks occurring"));
}

#[test]
fn find_requires_a_keyword_and_searches_rendered_lines() {
    let mut tracker = empty_tracker();
    tracker.handle("todo buy milk");
    tracker.handle("todo call landlord");

    assert!(tracker.handle("find").contains("Tell me what to look for"));

    let found = tracker.handle("find milk");
    assert!(found.contains("buy milk"));
    assert!(!found.contains("call landlord"));

    assert!(tracker.handle("find plumber").contains("No tasks matching"));
}

#[test]
fn add_validation_errors_name_the_missing_piece() {
    let mut tracker = empty_tracker();

    assert!(tracker.handle("todo").contains("needs a description"));
    assert!(tracker
        .handle("deadline submit report")
        .contains("When is this due?"));
    assert!(tracker
        .handle("event conference /from 1/10/2024 0900")
        .contains("needs both"));
    assert!(tracker
        .handle("event conference /from /to 1/10/2024 1700")
        .contains("cannot be left blank"));
    assert!(tracker.handle("buy milk").contains("Unknown task type"));
}

#[test]
fn unrecognized_first_word_is_treated_as_task_text() {
    let mut tracker = empty_tracker();
    // The classifier falls back to add; the dispatcher then rejects the
    // unknown type rather than the parser rejecting the line.
    let response = tracker.handle("remind me to stretch");
    assert!(response.contains("Unknown task type `remind`"));
}

#[test]
fn every_mutation_writes_through_to_the_store() {
    let records = Rc::new(RefCell::new(None));
    let store = MemoryTaskStore {
        records: Rc::clone(&records),
        fail_saves: false,
    };
    let mut tracker = Tracker::open(store);

    tracker.handle("todo buy milk");
    assert_eq!(
        records.borrow().as_deref(),
        Some(&["T | 0 | buy milk".to_string()][..])
    );

    tracker.handle("mark 1");
    assert_eq!(
        records.borrow().as_deref(),
        Some(&["T | 1 | buy milk".to_string()][..])
    );

    tracker.handle("clear");
    assert_eq!(records.borrow().as_deref(), Some(&[][..]));
}

#[test]
fn rehydration_restores_variants_and_done_state() {
    let records = Rc::new(RefCell::new(None));
    {
        let store = MemoryTaskStore {
            records: Rc::clone(&records),
            fail_saves: false,
        };
        let mut tracker = Tracker::open(store);
        tracker.handle("todo buy milk");
        tracker.handle("deadline submit report /by 1/10/2024 1700");
        tracker.handle("mark 2");
    }

    let store = MemoryTaskStore {
        records: Rc::clone(&records),
        fail_saves: false,
    };
    let tracker = Tracker::open(store);

    assert_eq!(tracker.tasks().len(), 2);
    assert!(!tracker.tasks().get(0).unwrap().is_done());
    assert!(tracker.tasks().get(1).unwrap().is_done());
    assert_eq!(
        tracker.tasks().get(1).unwrap().to_string(),
        "[D][X] submit report (by: Oct 01 2024, 5.00 pm)"
    );
}

#[test]
fn failed_save_keeps_state_and_appends_a_warning() {
    let store = MemoryTaskStore {
        records: Rc::new(RefCell::new(None)),
        fail_saves: true,
    };
    let mut tracker = Tracker::open(store);

    let response = tracker.handle("todo buy milk");
    assert!(response.contains("added this task"));
    assert!(response.contains("could not be saved"));
    assert_eq!(tracker.tasks().len(), 1);
}

#[test]
fn pipe_in_description_is_rejected_so_the_store_survives_restart() {
    let records = Rc::new(RefCell::new(None));
    {
        let store = MemoryTaskStore {
            records: Rc::clone(&records),
            fail_saves: false,
        };
        let mut tracker = Tracker::open(store);

        let response = tracker.handle("todo buy milk | eggs");
        assert!(response.contains("reserved"));
        assert!(tracker.tasks().is_empty());

        tracker.handle("todo water plants");
    }

    let store = MemoryTaskStore {
        records: Rc::clone(&records),
        fail_saves: false,
    };
    let tracker = Tracker::open(store);

    assert_eq!(tracker.tasks().len(), 1);
    assert_eq!(tracker.tasks().get(0).unwrap().description(), "water plants");
}

#[test]
fn corrupt_store_rehydrates_as_empty() {
    let store = MemoryTaskStore {
        records: Rc::new(RefCell::new(Some(vec!["garbage line".to_string()]))),
        fail_saves: false,
    };
    let tracker = Tracker::open(store);
    assert!(tracker.tasks().is_empty());
}

#[test]
fn now_and_help_and_bye_answer_without_touching_tasks() {
    let mut tracker = empty_tracker();

    assert!(tracker.handle("now").starts_with("It is now "));
    assert!(tracker.handle("help").contains("snooze <n>"));
    assert!(tracker.handle("bye").contains("Bye"));
    assert!(tracker.tasks().is_empty());
}
