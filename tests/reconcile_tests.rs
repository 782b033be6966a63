//! End-to-end reconciliation over the SQLite store: events and templates
//! go in through the db layer, weekly rows come out of the engine.

use chrono::NaiveDate;
use puntual::core::Engine;
use puntual::db::queries;
use puntual::errors::AppError;
use puntual::models::event::AttendanceEvent;
use puntual::models::schedule::DayWindow;
use puntual::utils::time::parse_window;

mod common;
use common::{open_initialized, setup_test_db};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn clock(conn: &rusqlite::Connection, person: i64, date: &str, time: &str, motive: &str) {
    let ev = AttendanceEvent::new(
        person,
        d(date),
        puntual::utils::time::parse_time(time).unwrap(),
        motive,
        None,
        false,
        "",
    );
    queries::insert_event(conn, &ev).expect("insert event");
}

fn office_week() -> [Option<DayWindow>; 7] {
    let win = parse_window("09:00-18:00@13:00-14:00").unwrap();
    [Some(win), Some(win), Some(win), Some(win), Some(win), None, None]
}

#[test]
fn stored_events_reconcile_to_weekly_overtime() {
    let db = setup_test_db("reconcile_weekly");
    let conn = open_initialized(&db);

    let tpl_id = queries::insert_template(&conn, "Office", true, &office_week()).unwrap();
    queries::upsert_assignment(&conn, 7, tpl_id, "clerk").unwrap();

    // Monday 2025-09-01: 08:00-17:00 with a 30 min meal = 30600 s worked
    clock(&conn, 7, "2025-09-01", "08:00", "entrada");
    clock(&conn, 7, "2025-09-01", "13:00", "salida de comida");
    clock(&conn, 7, "2025-09-01", "13:30", "entrada de comida");
    clock(&conn, 7, "2025-09-01", "17:00", "salida");

    let events = queries::load_events_for(&conn, 7, d("2025-09-01"), d("2025-09-01")).unwrap();
    let template = queries::load_template_for_person(&conn, 7).unwrap();
    assert!(template.is_some());

    let rec = Engine::reconcile(7, &events, template.as_ref(), d("2025-09-01"), d("2025-09-01"));
    assert_eq!(rec.weekly.len(), 1);
    assert_eq!(rec.weekly[0].worked_seconds, 30_600);
    assert_eq!(rec.weekly[0].scheduled_seconds, 28_800);
    assert_eq!(rec.weekly[0].overtime_seconds, 1_800);
    assert_eq!(rec.weekly[0].days_scheduled, 5);
    assert_eq!(rec.weekly[0].compliance_pct, Some(20.0));
}

#[test]
fn events_of_other_people_are_not_fetched() {
    let db = setup_test_db("reconcile_isolation");
    let conn = open_initialized(&db);

    clock(&conn, 7, "2025-09-01", "08:00", "entrada");
    clock(&conn, 8, "2025-09-01", "09:00", "entrada");
    clock(&conn, 8, "2025-09-01", "17:00", "salida");

    let events = queries::load_events_for(&conn, 7, d("2025-09-01"), d("2025-09-01")).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].person_id, 7);
}

#[test]
fn unclassified_motive_survives_the_round_trip() {
    let db = setup_test_db("reconcile_unclassified");
    let conn = open_initialized(&db);

    clock(&conn, 7, "2025-09-01", "08:00", "entrada");
    clock(&conn, 7, "2025-09-01", "10:00", "visita de proveedor");
    clock(&conn, 7, "2025-09-01", "17:00", "salida");

    let history = queries::load_history(&conn, 7, 100).unwrap();
    assert_eq!(history.len(), 3, "unclassified events stay in history");

    let events = queries::load_events_for(&conn, 7, d("2025-09-01"), d("2025-09-01")).unwrap();
    let rec = Engine::reconcile(7, &events, None, d("2025-09-01"), d("2025-09-01"));
    assert_eq!(rec.worked[0].worked_seconds, 9 * 3600);
}

#[test]
fn reassignment_replaces_the_previous_template() {
    let db = setup_test_db("reassign_upsert");
    let conn = open_initialized(&db);

    let first = queries::insert_template(&conn, "Office", true, &office_week()).unwrap();
    let second = queries::insert_template(&conn, "HalfDays", true, &{
        let win = parse_window("09:00-13:00").unwrap();
        [Some(win), Some(win), Some(win), None, None, None, None]
    })
    .unwrap();

    queries::upsert_assignment(&conn, 7, first, "clerk").unwrap();
    queries::upsert_assignment(&conn, 7, second, "clerk").unwrap();

    let tpl = queries::load_template_for_person(&conn, 7).unwrap().unwrap();
    assert_eq!(tpl.id, second);
    assert_eq!(tpl.days_scheduled(), 3);

    // One active assignment per person: a single row remains.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM assignments WHERE person_id = 7", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn duplicate_template_name_is_a_conflict() {
    let db = setup_test_db("dup_template");
    let conn = open_initialized(&db);

    queries::insert_template(&conn, "Office", true, &office_week()).unwrap();
    let err = queries::insert_template(&conn, "Office", true, &office_week()).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
}

#[test]
fn inactive_template_resolves_to_no_schedule() {
    let db = setup_test_db("inactive_template");
    let conn = open_initialized(&db);

    let tpl_id = queries::insert_template(&conn, "Retired", false, &office_week()).unwrap();
    queries::upsert_assignment(&conn, 7, tpl_id, "clerk").unwrap();

    assert!(queries::load_template_for_person(&conn, 7).unwrap().is_none());
}

#[test]
fn deleting_a_missing_template_is_not_found() {
    let db = setup_test_db("del_template");
    let conn = open_initialized(&db);

    let err = queries::delete_template(&conn, 42).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn scheduled_only_week_appears_with_zero_worked() {
    let db = setup_test_db("scheduled_only");
    let conn = open_initialized(&db);

    let tpl_id = queries::insert_template(&conn, "Office", true, &office_week()).unwrap();
    queries::upsert_assignment(&conn, 7, tpl_id, "clerk").unwrap();

    // No events at all: the template alone must anchor the week.
    let events = queries::load_events_for(&conn, 7, d("2025-09-01"), d("2025-09-07")).unwrap();
    let template = queries::load_template_for_person(&conn, 7).unwrap();
    let rec = Engine::reconcile(7, &events, template.as_ref(), d("2025-09-01"), d("2025-09-07"));

    assert!(rec.worked.is_empty());
    assert_eq!(rec.weekly.len(), 1);
    assert_eq!(rec.weekly[0].worked_seconds, 0);
    assert_eq!(rec.weekly[0].scheduled_seconds, 5 * 28_800);
    assert_eq!(rec.weekly[0].overtime_seconds, 0);
    assert_eq!(rec.weekly[0].compliance_pct, Some(0.0));
}
