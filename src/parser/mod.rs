//! JSONL parser for recorded pointer traces.
//!
//! One event per line:
//!
//! ```text
//! {"t":0,"kind":"down","actor":0,"pointers":[{"id":0,"x":100.0,"y":0.0}]}
//! ```
//!
//! `t` is the event time in milliseconds. Parsing is pure and validates each
//! event before it reaches the gesture tracker.

use crate::constants::MAX_TRACE_TIMESTAMP_MS;
use crate::model::{PointerEvent, PointerKind, PointerSample, TraceError};
use serde::Deserialize;

/// A pointer event with the time it was delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Delivery time in milliseconds.
    pub at_ms: u64,
    /// The pointer event itself.
    pub event: PointerEvent,
}

/// Raw JSON structure for deserializing a trace line.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTraceLine {
    t: u64,
    kind: PointerKind,
    actor: u32,
    pointers: Vec<PointerSample>,
}

/// Parse a single trace line.
///
/// # Errors
///
/// `TraceError::InvalidJson` for syntax or schema errors,
/// `TraceError::InvalidEvent` for events that cannot happen (no pointers,
/// duplicate pointer ids, a down/up whose actor is not among the pointers,
/// non-finite coordinates, a time beyond [`MAX_TRACE_TIMESTAMP_MS`]).
pub fn parse_event(line: &str, line_number: usize) -> Result<TimedEvent, TraceError> {
    let raw: RawTraceLine =
        serde_json::from_str(line).map_err(|e| TraceError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    let invalid = |reason: &str| TraceError::InvalidEvent {
        line: line_number,
        reason: reason.to_string(),
    };

    if raw.t > MAX_TRACE_TIMESTAMP_MS {
        return Err(invalid("event time is out of range"));
    }
    if raw.pointers.is_empty() {
        return Err(invalid("event has no pointers"));
    }
    if raw
        .pointers
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(invalid("pointer coordinates must be finite"));
    }
    for (i, p) in raw.pointers.iter().enumerate() {
        if raw.pointers[..i].iter().any(|q| q.id == p.id) {
            return Err(invalid("duplicate pointer id"));
        }
    }

    let event = PointerEvent::new(raw.kind, raw.actor, raw.pointers);
    if event.kind != PointerKind::Move && event.x_of(event.actor).is_none() {
        return Err(invalid("acting pointer is not among the pointers"));
    }

    Ok(TimedEvent {
        at_ms: raw.t,
        event,
    })
}

/// Parse every non-blank line, collecting good events and errors separately.
///
/// `starting_line_number` is the 1-based number of the first line.
pub fn parse_trace(
    lines: Vec<String>,
    starting_line_number: usize,
) -> (Vec<TimedEvent>, Vec<TraceError>) {
    let mut events = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_event(&line, starting_line_number + index) {
            Ok(event) => events.push(event),
            Err(err) => errors.push(err),
        }
    }

    (events, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PointerId;

    #[test]
    fn parses_two_finger_down() {
        let event = parse_event(
            r#"{"t":16,"kind":"down","actor":1,"pointers":[{"id":0,"x":100},{"id":1,"x":300,"y":5}]}"#,
            1,
        )
        .expect("valid line");

        assert_eq!(event.at_ms, 16);
        assert_eq!(event.event.kind, PointerKind::Down);
        assert_eq!(event.event.actor, PointerId::new(1));
        assert_eq!(event.event.pointer_count(), 2);
        assert_eq!(event.event.x_of(PointerId::new(1)), Some(300.0));
    }

    #[test]
    fn malformed_json_reports_line_number() {
        let err = parse_event("{not json", 12).expect_err("invalid json");
        assert!(matches!(err, TraceError::InvalidJson { line: 12, .. }));
    }

    #[test]
    fn unknown_kind_is_invalid_json() {
        let err = parse_event(
            r#"{"t":0,"kind":"hover","actor":0,"pointers":[{"id":0,"x":1}]}"#,
            3,
        )
        .expect_err("unknown kind");
        assert!(matches!(err, TraceError::InvalidJson { line: 3, .. }));
    }

    #[test]
    fn empty_pointer_list_is_rejected() {
        let err = parse_event(r#"{"t":0,"kind":"move","actor":0,"pointers":[]}"#, 2)
            .expect_err("no pointers");
        assert!(matches!(err, TraceError::InvalidEvent { line: 2, .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_event(
            r#"{"t":0,"kind":"move","actor":0,"pointers":[{"id":0,"x":1},{"id":0,"x":2}]}"#,
            4,
        )
        .expect_err("duplicate ids");
        assert!(matches!(err, TraceError::InvalidEvent { line: 4, .. }));
    }

    #[test]
    fn up_for_absent_actor_is_rejected() {
        let err = parse_event(
            r#"{"t":0,"kind":"up","actor":9,"pointers":[{"id":0,"x":1}]}"#,
            5,
        )
        .expect_err("actor missing");
        assert!(matches!(err, TraceError::InvalidEvent { line: 5, .. }));
    }

    #[test]
    fn timestamp_near_u64_max_is_rejected() {
        let line = format!(
            r#"{{"t":{},"kind":"down","actor":1,"pointers":[{{"id":0,"x":1}},{{"id":1,"x":2}}]}}"#,
            u64::MAX - 5
        );
        let err = parse_event(&line, 6).expect_err("time out of range");
        assert!(matches!(err, TraceError::InvalidEvent { line: 6, .. }));
    }

    #[test]
    fn timestamp_at_limit_is_accepted() {
        let line = format!(
            r#"{{"t":{MAX_TRACE_TIMESTAMP_MS},"kind":"down","actor":1,"pointers":[{{"id":0,"x":1}},{{"id":1,"x":2}}]}}"#
        );
        let event = parse_event(&line, 1).expect("time at limit");
        assert_eq!(event.at_ms, MAX_TRACE_TIMESTAMP_MS);
    }

    #[test]
    fn parse_trace_skips_blank_lines_and_collects_errors() {
        let lines = vec![
            r#"{"t":0,"kind":"down","actor":0,"pointers":[{"id":0,"x":1}]}"#.to_string(),
            String::new(),
            "garbage".to_string(),
            r#"{"t":5,"kind":"up","actor":0,"pointers":[{"id":0,"x":1}]}"#.to_string(),
        ];

        let (events, errors) = parse_trace(lines, 1);

        assert_eq!(events.len(), 2);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TraceError::InvalidJson { line: 3, .. }));
    }
}
