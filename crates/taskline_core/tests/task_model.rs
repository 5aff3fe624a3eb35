use taskline_core::{SnoozeOutcome, SnoozeUnit, Task, TaskKind};

#[test]
fn todo_renders_with_type_and_done_tags() {
    let mut task = Task::todo("buy milk").unwrap();
    assert_eq!(task.to_string(), "[T][ ] buy milk");

    task.mark();
    assert_eq!(task.to_string(), "[T][X] buy milk");
}

#[test]
fn dated_variants_render_display_form_suffixes() {
    let deadline = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    assert_eq!(
        deadline.to_string(),
        "[D][ ] submit report (by: Oct 01 2024, 5.00 pm)"
    );

    let event = Task::event("team sync", "1/10/2024 0900", "1/10/2024 1000").unwrap();
    assert_eq!(
        event.to_string(),
        "[E][ ] team sync (from: Oct 01 2024, 9.00 am to: Oct 01 2024, 10.00 am)"
    );
}

#[test]
fn description_is_trimmed_at_construction() {
    let task = Task::todo("  buy milk  ").unwrap();
    assert_eq!(task.description(), "buy milk");
}

#[test]
fn mark_is_idempotent_and_unmark_restores() {
    let mut task = Task::todo("water plants").unwrap();
    assert!(!task.is_done());

    task.mark();
    task.mark();
    assert!(task.is_done());

    task.unmark();
    assert!(!task.is_done());
    task.unmark();
    assert!(!task.is_done());
}

#[test]
fn deadline_construction_rejects_malformed_date() {
    assert!(Task::deadline("submit report", "tomorrow 5pm").is_err());
    assert!(Task::deadline("submit report", "1/10/2024").is_err());
}

#[test]
fn snooze_deadline_by_minutes_moves_due_time() {
    let mut task = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    let outcome = task.snooze(SnoozeUnit::Minute, 30).unwrap();

    assert_eq!(outcome, SnoozeOutcome::Moved);
    match task.kind() {
        TaskKind::Deadline { due } => assert_eq!(due.to_persisted_string(), "1/10/2024 1730"),
        other => panic!("expected deadline kind, got {other:?}"),
    }
}

#[test]
fn snooze_deadline_by_days_keeps_time_unchanged() {
    let mut task = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    task.snooze(SnoozeUnit::Day, 2).unwrap();

    match task.kind() {
        TaskKind::Deadline { due } => assert_eq!(due.to_persisted_string(), "3/10/2024 1700"),
        other => panic!("expected deadline kind, got {other:?}"),
    }
}

#[test]
fn snooze_event_preserves_duration_exactly() {
    let mut task = Task::event("overnight job", "1/10/2024 2345", "2/10/2024 0045").unwrap();
    task.snooze(SnoozeUnit::Minute, 30).unwrap();

    match task.kind() {
        TaskKind::Event { start, end } => {
            // Start crossed midnight; the one-hour span is intact.
            assert_eq!(start.to_persisted_string(), "2/10/2024 0015");
            assert_eq!(end.to_persisted_string(), "2/10/2024 0115");
        }
        other => panic!("expected event kind, got {other:?}"),
    }
}

#[test]
fn snooze_todo_is_a_no_op_with_descriptive_outcome() {
    let mut task = Task::todo("buy milk").unwrap();
    let before = task.clone();

    let outcome = task.snooze(SnoozeUnit::Hour, 5).unwrap();
    assert_eq!(outcome, SnoozeOutcome::NoTemporalAnchor);
    assert_eq!(task, before);
}

#[test]
fn record_codec_round_trips_every_variant() {
    let todo = Task::todo("buy milk").unwrap();
    assert_eq!(todo.to_record(), "T | 0 | buy milk");
    assert_eq!(Task::from_record(&todo.to_record()).unwrap(), todo);

    let mut deadline = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    deadline.mark();
    assert_eq!(
        deadline.to_record(),
        "D | 1 | submit report | 1/10/2024 1700"
    );
    assert_eq!(Task::from_record(&deadline.to_record()).unwrap(), deadline);

    let event = Task::event("team sync", "1/10/2024 0900", "1/10/2024 1000").unwrap();
    assert_eq!(
        event.to_record(),
        "E | 0 | team sync | 1/10/2024 0900 | 1/10/2024 1000"
    );
    assert_eq!(Task::from_record(&event.to_record()).unwrap(), event);
}

#[test]
fn record_delimiter_cannot_enter_a_description() {
    // A pipe inside the description would shift the record's field count,
    // making the persisted line undecodable on the next startup.
    let err = Task::todo("buy milk | eggs").unwrap_err();
    assert!(err.to_string().contains('|'));
    assert!(Task::deadline("a|b", "1/10/2024 1700").is_err());
    assert!(Task::event("x | y", "1/10/2024 0900", "1/10/2024 1700").is_err());
}

#[test]
fn snooze_past_representable_dates_errs_without_moving_anything() {
    let mut task = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    assert!(task.snooze(SnoozeUnit::Day, 4_000_000_000).is_err());
    assert_eq!(task.to_record(), "D | 0 | submit report | 1/10/2024 1700");

    let mut event = Task::event("fair", "1/10/2024 0900", "1/10/2024 1700").unwrap();
    assert!(event.snooze(SnoozeUnit::Day, 4_000_000_000).is_err());
    assert_eq!(
        event.to_record(),
        "E | 0 | fair | 1/10/2024 0900 | 1/10/2024 1700"
    );
}

#[test]
fn record_decoding_rejects_malformed_lines() {
    assert!(Task::from_record("T | 0").is_err());
    assert!(Task::from_record("Z | 0 | mystery").is_err());
    assert!(Task::from_record("T | yes | buy milk").is_err());
    assert!(Task::from_record("D | 0 | submit report").is_err());
    assert!(Task::from_record("D | 0 | submit report | not a date").is_err());
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::deadline("submit report", "1/10/2024 1700").unwrap();
    task.mark();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["type"], "deadline");
    assert_eq!(json["description"], "submit report");
    assert_eq!(json["done"], true);
    assert_eq!(json["due"], "1/10/2024 1700");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn event_serialization_carries_both_bounds() {
    let task = Task::event("team sync", "1/10/2024 0900", "1/10/2024 1000").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["type"], "event");
    assert_eq!(json["start"], "1/10/2024 0900");
    assert_eq!(json["end"], "1/10/2024 1000");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
