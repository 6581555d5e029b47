//! Rejected input emits exactly one debug event; accepted input emits none.

use std::fmt;
use std::sync::{Arc, Mutex};

use mpack::{encode, DecodeError, Decoder, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    level: Level,
    message: String,
    error: String,
    input_len: u64,
}

impl Visit for Recorded {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "input_len" {
            self.input_len = value;
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "error" => self.error = format!("{value:?}"),
            _ => {}
        }
    }
}

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorded = Recorded {
            level: *event.metadata().level(),
            message: String::new(),
            error: String::new(),
            input_len: 0,
        };
        event.record(&mut recorded);
        self.events.lock().unwrap().push(recorded);
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Recorded>) {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let events = recorder.events.lock().unwrap().clone();
    (out, events)
}

fn assert_one_rejection(events: &[Recorded], err: &DecodeError, input_len: usize) {
    assert_eq!(events.len(), 1, "events: {events:?}");
    let event = &events[0];
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.message, "rejected mpack input");
    assert_eq!(event.error, err.to_string());
    assert_eq!(event.input_len, input_len as u64);
}

#[test]
fn rejected_decode_logs_once() {
    let input = [0x92, 0xc0, 0xc1];
    let (result, events) = capture(|| Decoder::new().decode(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::UnsupportedTag { tag: 0xc1, offset: 2 });
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn truncated_decode_logs_once() {
    let input = [0xcd, 0x01];
    let (result, events) = capture(|| mpack::decode(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::UnexpectedEndOfInput);
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn decode_exact_with_trailing_bytes_logs_once() {
    let input = [0xc0, 0xc3, 0xc2];
    let (result, events) = capture(|| mpack::decode_exact(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::TrailingBytes { remaining: 2 });
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn decode_exact_with_bad_value_logs_once() {
    let input = [0xa2, b'a'];
    let (result, events) = capture(|| mpack::decode_exact(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::UnexpectedEndOfInput);
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn validate_failure_logs_once() {
    let input = [0x81, 0xa1, b'k', 0xc7];
    let (result, events) = capture(|| Decoder::new().validate(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::UnsupportedTag { tag: 0xc7, offset: 3 });
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn validate_with_trailing_bytes_logs_once() {
    let input = [0x90, 0x90];
    let (result, events) = capture(|| Decoder::new().validate(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::TrailingBytes { remaining: 1 });
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn failing_iteration_logs_once() {
    let input = [0x01, 0x02, 0xc1, 0x03];
    let (items, events) = capture(|| Decoder::new().iter(&input).collect::<Vec<_>>());
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Ok(Value::Integer(1)));
    assert_eq!(items[1], Ok(Value::Integer(2)));
    let err = items[2].clone().unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedTag { tag: 0xc1, .. }));
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn nesting_limit_logs_once() {
    let input = [0x91, 0x91, 0x91, 0xc0];
    let (result, events) = capture(|| Decoder::with_max_depth(2).decode(&input));
    let err = result.unwrap_err();
    assert_eq!(err, DecodeError::NestingTooDeep { limit: 2 });
    assert_one_rejection(&events, &err, input.len());
}

#[test]
fn accepted_input_logs_nothing() {
    let value = Value::Map(vec![
        (Value::from("a"), Value::Array(vec![Value::Null, Value::from(-300)])),
        (Value::from("b"), Value::Float64(0.5)),
    ]);
    let bytes = encode(&value);
    let mut stream = bytes.clone();
    stream.extend_from_slice(&bytes);

    let ((), events) = capture(|| {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode(&stream).unwrap(), (value.clone(), &bytes[..]));
        assert_eq!(decoder.decode_exact(&bytes).unwrap(), value);
        assert_eq!(decoder.skip(&stream).unwrap(), &bytes[..]);
        decoder.validate(&bytes).unwrap();
        let all: Vec<_> = decoder.iter(&stream).collect();
        assert_eq!(all, vec![Ok(value.clone()), Ok(value.clone())]);
    });
    assert!(events.is_empty(), "events: {events:?}");
}

#[test]
fn empty_iteration_logs_nothing() {
    let (count, events) = capture(|| Decoder::new().iter(&[]).count());
    assert_eq!(count, 0);
    assert!(events.is_empty(), "events: {events:?}");
}
