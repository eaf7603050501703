// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! Behaviour of the [`Truncation`] state machine, driven with explicit timestamps.

use std::time::Duration;

use ellipsis_core::{EllipsisConfig, ResizeSample, Truncation};

mod common;
use common::*;

fn sample(width: f64, height: f64) -> ResizeSample {
    ResizeSample::new(width, height)
}

#[test]
fn overflowing_content_shows_button_after_debounce() {
    let mut fx = Fixture::new("This content is too big for its container", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));

    assert_eq!(fx.machine.next_deadline(), Some(DEBOUNCE));
    assert!(!fx.machine.poll(ms(499)));
    assert!(fx.decisions().is_empty());

    assert!(fx.machine.poll(ms(500)));
    assert_eq!(fx.decisions(), [true]);
    assert_eq!(fx.machine.is_overflowing(), Some(true));
    assert_eq!(fx.machine.button_label(), "Show more");
    assert_eq!(fx.machine.next_deadline(), None);
}

#[test]
fn fitting_content_hides_button() {
    let mut fx = Fixture::new("This content fits", 500.0, 500.0);
    fx.machine.resize(sample(500.0, BUTTON_HEIGHT), ms(0));
    fx.machine.poll(DEBOUNCE);

    assert_eq!(fx.decisions(), [false]);
    assert!(!fx.machine.show_button());
}

#[test]
fn empty_content_never_overflows() {
    let mut fx = Fixture::new("", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    fx.machine.poll(DEBOUNCE);

    assert_eq!(fx.decisions(), [false]);
    assert_eq!(fx.machine.is_overflowing(), Some(false));
}

#[test]
fn toggle_always_expands_immediately() {
    let mut fx = Fixture::new("short", 500.0, 500.0);
    fx.machine.toggle(ms(0));

    assert_eq!(fx.decisions(), [true]);
    assert!(fx.machine.is_showing_more());
    assert_eq!(fx.machine.button_label(), "Show less");

    fx.machine.toggle(ms(10));
    assert!(!fx.machine.is_showing_more());
    assert_eq!(fx.machine.button_label(), "Show more");
}

#[test]
fn expanded_content_back_on_one_line_hides_button() {
    let mut fx = Fixture::new("long enough to wrap", 200.0, 500.0);
    fx.machine.toggle(ms(0));
    fx.span.set_widths(500.0, 500.0);
    fx.machine
        .resize(sample(500.0, BUTTON_HEIGHT + 4.0), ms(10));

    assert_eq!(fx.decisions(), [true, false]);

    // The overflow check still runs, but it does not touch the control while expanded.
    assert!(fx.machine.poll(ms(10) + DEBOUNCE));
    assert_eq!(fx.decisions(), [true, false]);
    assert_eq!(fx.machine.is_overflowing(), Some(false));
    assert!(fx.machine.is_showing_more());
}

#[test]
fn expanded_multi_line_content_keeps_button() {
    let mut fx = Fixture::new("long enough to wrap", 200.0, 500.0);
    fx.machine.toggle(ms(0));
    fx.machine.resize(sample(200.0, 60.0), ms(10));
    assert_eq!(fx.decisions(), [true, true]);

    // Same line count, no new decision.
    fx.machine.resize(sample(200.0, 61.0), ms(20));
    assert_eq!(fx.decisions(), [true, true]);

    // Within tolerance of the button height plus margin.
    fx.machine
        .resize(sample(900.0, BUTTON_HEIGHT + 4.0 + 9.0), ms(30));
    assert_eq!(fx.decisions(), [true, true, false]);

    fx.machine
        .resize(sample(400.0, BUTTON_HEIGHT + 4.0 + 10.0), ms(40));
    assert_eq!(fx.decisions(), [true, true, false, true]);
}

#[test]
fn height_changes_are_ignored_while_collapsed() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT + 4.0), ms(0));
    fx.machine.resize(sample(200.0, 80.0), ms(10));
    fx.button.set_height(30.0);
    fx.machine.refresh_toggle_height();

    assert!(fx.decisions().is_empty());
}

#[test]
fn small_width_changes_do_not_trigger_evaluation() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(300.0, BUTTON_HEIGHT), ms(0));
    fx.machine.poll(DEBOUNCE);
    assert_eq!(fx.span.measurements.get(), 1);

    fx.machine.resize(sample(301.0, BUTTON_HEIGHT), ms(1000));
    fx.machine.resize(sample(301.5, BUTTON_HEIGHT), ms(1010));
    fx.machine.resize(sample(300.5, BUTTON_HEIGHT), ms(1020));
    assert_eq!(fx.machine.next_deadline(), None);
    fx.machine.poll(ms(5000));
    assert_eq!(fx.span.measurements.get(), 1);

    fx.machine.resize(sample(303.0, BUTTON_HEIGHT), ms(6000));
    assert_eq!(fx.machine.next_deadline(), Some(ms(6000) + DEBOUNCE));
}

#[test]
fn first_width_is_compared_against_zero() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(0.5, 0.0), ms(0));
    assert_eq!(fx.machine.next_deadline(), None);

    fx.machine.resize(sample(2.0, 0.0), ms(10));
    assert_eq!(fx.machine.next_deadline(), Some(ms(10) + DEBOUNCE));
}

#[test]
fn resize_bursts_collapse_into_one_evaluation() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(300.0, BUTTON_HEIGHT), ms(0));
    fx.machine.resize(sample(400.0, BUTTON_HEIGHT), ms(100));
    fx.machine.resize(sample(250.0, BUTTON_HEIGHT), ms(200));

    assert!(!fx.machine.poll(ms(600)));
    assert_eq!(fx.span.measurements.get(), 0);

    // The evaluation measures the element as it is when the timer fires.
    fx.span.set_widths(250.0, 250.0);
    assert!(fx.machine.poll(ms(700)));
    assert_eq!(fx.span.measurements.get(), 1);
    assert_eq!(fx.decisions(), [false]);
}

#[test]
fn content_changes_restart_the_debounce() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    fx.machine.set_content("longer".into(), ms(300));
    assert_eq!(fx.machine.next_deadline(), Some(ms(800)));

    fx.machine.set_content(String::new(), ms(400));
    fx.machine.poll(ms(900));
    assert_eq!(fx.decisions(), [false]);
    assert_eq!(fx.machine.content(), Some(""));
}

#[test]
fn missing_content_element_withholds_checks() {
    let mut machine = Truncation::<TestSpan, TestButton>::new(EllipsisConfig::default());
    machine.set_content("long".into(), ms(0));
    machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    assert_eq!(machine.next_deadline(), None);

    machine.set_content_element(Some(TestSpan::new(200.0, 500.0)), ms(50));
    assert_eq!(machine.next_deadline(), Some(ms(50) + DEBOUNCE));
    machine.poll(ms(550));
    assert!(machine.show_button());
}

#[test]
fn content_element_removed_before_deadline_is_not_measured() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    fx.machine.set_content_element(None, ms(10));
    fx.machine.poll(DEBOUNCE);

    assert!(fx.decisions().is_empty());
    assert_eq!(fx.machine.is_overflowing(), None);
}

#[test]
fn missing_toggle_element_withholds_line_check() {
    let mut machine = Truncation::<TestSpan, TestButton>::new(EllipsisConfig::default());
    let (decisions, listener) = recorder::<bool>();
    machine.show_button_stream().subscribe(listener);

    machine.toggle(ms(0));
    machine.resize(sample(500.0, BUTTON_HEIGHT + 4.0), ms(10));
    assert_eq!(*decisions.borrow(), [true]);

    machine.set_toggle_element(Some(TestButton::new(BUTTON_HEIGHT)));
    assert_eq!(*decisions.borrow(), [true, false]);
}

#[test]
fn toggle_height_changes_are_deduplicated() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.toggle(ms(0));
    fx.machine.resize(sample(200.0, 40.0), ms(10));
    assert_eq!(fx.decisions(), [true, true]);

    fx.machine.set_toggle_element(Some(fx.button.clone()));
    fx.machine.refresh_toggle_height();
    assert_eq!(fx.decisions(), [true, true]);

    // A taller control makes 40 units a single line.
    fx.button.set_height(30.0);
    fx.machine.refresh_toggle_height();
    assert_eq!(fx.decisions(), [true, true, false]);
}

#[test]
fn collapsing_rechecks_overflow() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    fx.machine.poll(DEBOUNCE);
    fx.machine.toggle(ms(1000));

    // The container grew while expanded; the width change alone does not touch the control.
    fx.span.set_widths(800.0, 500.0);
    fx.machine.resize(sample(800.0, 60.0), ms(1100));
    fx.machine.poll(ms(1600));
    assert_eq!(fx.decisions(), [true, true, true]);

    fx.machine.toggle(ms(2000));
    assert_eq!(fx.machine.next_deadline(), Some(ms(2000) + DEBOUNCE));
    fx.machine.poll(ms(2500));
    assert_eq!(fx.decisions(), [true, true, true, false]);
}

#[test]
fn labels_follow_configuration() {
    let config = EllipsisConfig::default().with_button_texts("More", "Less");
    let mut fx = Fixture::with_config(config, "long", 200.0, 500.0);
    let (labels, listener) = recorder::<String>();
    fx.machine.button_label_stream().subscribe(listener);

    fx.machine.toggle(ms(0));
    fx.machine.set_button_texts("Mehr", "Weniger");
    fx.machine.toggle(ms(10));

    assert_eq!(*labels.borrow(), ["More", "Less", "Weniger", "Mehr"]);
}

#[test]
fn custom_thresholds_apply() {
    let config = EllipsisConfig::default()
        .with_width_threshold(10.0)
        .with_single_line_detection(4.0, 4.0)
        .with_resize_debounce(Duration::from_millis(100));
    let mut fx = Fixture::with_config(config, "long", 200.0, 500.0);

    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    assert_eq!(fx.machine.next_deadline(), Some(ms(100)));
    fx.machine.poll(ms(100));
    fx.machine.resize(sample(210.0, BUTTON_HEIGHT), ms(200));
    assert_eq!(fx.machine.next_deadline(), None);

    fx.machine.toggle(ms(300));
    fx.machine.resize(sample(210.0, BUTTON_HEIGHT + 8.0), ms(400));
    assert_eq!(fx.decisions(), [true, true, true]);
}

#[test]
fn shutdown_cancels_and_silences() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    fx.machine.shutdown();

    assert_eq!(fx.machine.next_deadline(), None);
    assert!(!fx.machine.poll(ms(10_000)));
    assert_eq!(fx.machine.show_button_stream().listener_count(), 0);

    fx.machine.toggle(ms(20_000));
    fx.machine.set_content("other".into(), ms(20_000));
    fx.machine.resize(sample(900.0, 90.0), ms(20_000));
    assert!(!fx.machine.is_showing_more());
    assert_eq!(fx.machine.content(), Some("long"));
    assert_eq!(fx.machine.next_deadline(), None);
    assert!(fx.decisions().is_empty());
    assert!(fx.machine.is_shut_down());
}

#[test]
fn content_defaults_to_empty() {
    let mut machine = Truncation::<TestSpan, TestButton>::new(EllipsisConfig::default());
    let (decisions, listener) = recorder::<bool>();
    machine.show_button_stream().subscribe(listener);
    assert_eq!(machine.content(), Some(""));

    machine.set_content_element(Some(TestSpan::new(200.0, 500.0)), ms(0));
    machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));
    assert_eq!(machine.next_deadline(), Some(DEBOUNCE));

    assert!(machine.poll(DEBOUNCE));
    assert_eq!(*decisions.borrow(), [false]);
}

#[test]
fn early_poll_republishes_the_pending_deadline() {
    let mut fx = Fixture::new("long", 200.0, 500.0);
    let (deadlines, listener) = recorder::<Option<Duration>>();
    fx.machine.deadline_stream().subscribe(listener);
    fx.machine.resize(sample(200.0, BUTTON_HEIGHT), ms(0));

    // A host timer which fired a little before the deadline.
    assert!(!fx.machine.poll(DEBOUNCE - Duration::from_micros(500)));
    assert_eq!(fx.machine.next_deadline(), Some(DEBOUNCE));
    assert_eq!(*deadlines.borrow(), [None, Some(DEBOUNCE), Some(DEBOUNCE)]);
    assert!(fx.decisions().is_empty());

    assert!(fx.machine.poll(DEBOUNCE));
    assert_eq!(fx.decisions(), [true]);
    assert_eq!(deadlines.borrow().last(), Some(&None));
}
