use hhmm_calc::engine::format::format_hhmm;
use hhmm_calc::engine::keys::parse_keys;
use hhmm_calc::engine::parse::parse_buffer;
use hhmm_calc::engine::{Calculator, TapeDelta, step};
use hhmm_calc::tape::{Symbol, TapeEntry};

fn press(keys: &str) -> (Calculator, Vec<TapeEntry>) {
    let mut state = Calculator::new();
    let mut tape = Vec::new();
    for event in parse_keys(keys).unwrap() {
        let transition = step(&state, event);
        match transition.tape {
            TapeDelta::Append(entries) => tape.extend(entries),
            TapeDelta::Clear => tape.clear(),
            TapeDelta::Unchanged => {}
        }
        state = transition.state;
    }
    (state, tape)
}

#[test]
fn test_buffer_display_examples() {
    let cases = [
        ("", "0:00"),
        ("5", "0:05"),
        ("45", "0:45"),
        ("130", "1:30"),
        ("1200", "12:00"),
    ];
    for (buffer, expected) in cases {
        assert_eq!(format_hhmm(parse_buffer(buffer)), expected, "buffer {:?}", buffer);
    }
}

#[test]
fn test_unnormalized_minutes_carry_into_hours() {
    // 99 h 99 min is accepted as-is and shown as the equivalent duration.
    assert_eq!(parse_buffer("9999"), 6039);
    assert_eq!(format_hhmm(parse_buffer("9999")), "100:39");
}

#[test]
fn test_negative_format() {
    assert_eq!(format_hhmm(-90), "-1:30");
}

#[test]
fn test_parse_inverts_format_for_valid_minute_fields() {
    for minutes in [0_i64, 1, 59, 60, 61, 90, 599, 600, 1439, 59_999] {
        let buffer = format_hhmm(minutes).replace(':', "");
        assert_eq!(parse_buffer(&buffer), minutes, "buffer {:?}", buffer);
    }
}

#[test]
fn test_add_sequence() {
    let (state, tape) = press("130 + 45 =");
    assert_eq!(state.display(), "2:15");
    assert_eq!(
        tape,
        vec![
            TapeEntry::new(Symbol::Start, 90),
            TapeEntry::new(Symbol::Add, 45),
            TapeEntry::new(Symbol::Equals, 135),
        ]
    );
}

#[test]
fn test_evaluate_on_empty_state() {
    let (state, tape) = press("=");
    assert_eq!(state.display(), "0:00");
    assert!(tape.is_empty());
}

#[test]
fn test_double_backspace() {
    let (state, _) = press("5 < <");
    assert_eq!(state.display(), "0:00");
    assert_eq!(state.buffer(), "");
}

#[test]
fn test_clear_all_resets_chain_and_tape() {
    let (state, tape) = press("100 + 30 - 5 ca");
    assert_eq!(state, Calculator::new());
    assert!(tape.is_empty());
}

#[test]
fn test_new_chain_after_result() {
    let (state, tape) = press("100+100= 15-30=");
    assert_eq!(state.display(), "-0:15");
    assert_eq!(tape.len(), 6);
    assert_eq!(tape[3], TapeEntry::new(Symbol::Start, 15));
}
