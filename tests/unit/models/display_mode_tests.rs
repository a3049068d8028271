// Unit tests for DisplayMode parsing and grid shape

use calendar_engine::models::display_mode::DisplayMode;
use calendar_engine::EngineError;
use test_case::test_case;

#[test_case("day", DisplayMode::Day ; "day")]
#[test_case("week", DisplayMode::Week ; "week")]
#[test_case("work_week", DisplayMode::WorkWeek ; "work week snake case")]
#[test_case("workweek", DisplayMode::WorkWeek ; "work week joined")]
#[test_case("work-week", DisplayMode::WorkWeek ; "work week kebab case")]
#[test_case("month", DisplayMode::Month ; "month")]
fn test_parse_display_mode(input: &str, expected: DisplayMode) {
    assert_eq!(input.parse::<DisplayMode>().unwrap(), expected);
}

#[test_case("quarter" ; "unknown name")]
#[test_case("" ; "empty")]
fn test_parse_rejects_unknown_mode(input: &str) {
    assert!(matches!(
        input.parse::<DisplayMode>(),
        Err(EngineError::InvalidDisplayMode(_))
    ));
}

#[test_case(DisplayMode::Day, 1 ; "day has one column")]
#[test_case(DisplayMode::WorkWeek, 5 ; "work week has five columns")]
#[test_case(DisplayMode::Week, 7 ; "week has seven columns")]
#[test_case(DisplayMode::Month, 7 ; "month has seven columns")]
fn test_day_columns(mode: DisplayMode, columns: i32) {
    assert_eq!(mode.day_columns(), columns);
}

#[test]
fn test_name_round_trips_through_parse() {
    for mode in DisplayMode::ALL {
        assert_eq!(mode.name().parse::<DisplayMode>().unwrap(), mode);
    }
}
