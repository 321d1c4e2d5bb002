//! CLI integration tests for craftplan
//!
//! Drives the interactive menu end-to-end by scripting stdin against a
//! scratch database file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn craftplan_cmd(database: &Path) -> Command {
    let mut cmd = Command::cargo_bin("craftplan").unwrap();
    cmd.arg("--database").arg(database);
    cmd
}

#[test]
fn test_blank_selection_exits() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("These are the available selections"))
        .stdout(predicate::str::contains("You are not working with a project."))
        .stdout(predicate::str::contains("Exiting the menu."));
}

#[test]
fn test_create_then_list_shows_the_project() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    // 1) create with name/hours/difficulty and blank notes, 2) list, then quit
    craftplan_cmd(&database)
        .write_stdin("1\nBuild deck\n20\n0\n3\n\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You have successfully created project: 1: Build deck",
        ))
        .stdout(predicate::str::contains("Projects"))
        .stdout(predicate::str::contains("  1: Build deck"));
}

#[test]
fn test_projects_persist_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("1\nMailbox post\n4.5\n\n2\n\n\n")
        .assert()
        .success();

    craftplan_cmd(&database)
        .write_stdin("2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1: Mailbox post"));
}

#[test]
fn test_select_shows_details_with_two_digit_hours() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    // Create with "12.5" estimated hours, then select project 1
    craftplan_cmd(&database)
        .write_stdin("1\nTile bathroom\n12.5\n3\n2\n\n3\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are working with project:"))
        .stdout(predicate::str::contains("1: Tile bathroom"))
        .stdout(predicate::str::contains("Estimated hours: 12.50"))
        .stdout(predicate::str::contains("Actual hours: 3.00"));
}

#[test]
fn test_update_with_blank_input_keeps_previous_values() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    // Create, select, update leaving every field blank, then re-select
    craftplan_cmd(&database)
        .write_stdin("1\nBookshelf\n6.25\n\n2\nOak boards\n3\n1\n4\n\n\n\n\n\n3\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated hours: 6.25"))
        .stdout(predicate::str::contains("Notes: Oak boards"));
}

#[test]
fn test_add_material_and_step_to_selected_project() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin(
            "1\nBuild deck\n20\n\n3\n\n3\n1\n6\n2x4 lumber\n8.75\n12\n7\nDig post holes\n\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Materials:"))
        .stdout(predicate::str::contains("2x4 lumber (cost 8.75, required 12)"))
        .stdout(predicate::str::contains("Steps:"))
        .stdout(predicate::str::contains("1. Dig post holes"));
}

#[test]
fn test_add_material_without_selection_asks_to_select() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("6\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please select a project."));
}

#[test]
fn test_delete_clears_the_selection() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    // Create, select, delete the selected project
    craftplan_cmd(&database)
        .write_stdin("1\nBuild deck\n\n\n\n\n3\n1\n5\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 1 was deleted successfully."))
        .stdout(predicate::str::contains("You are not working with a project."));
}

#[test]
fn test_delete_missing_project_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("5\n42\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Project with ID=42 does not exist. Try again.",
        ));
}

#[test]
fn test_invalid_selection_number_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("9\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("9 is not a valid selection. Try again."));
}

#[test]
fn test_non_numeric_selection_is_an_input_error_not_a_crash() {
    let temp_dir = TempDir::new().unwrap();
    let database = temp_dir.path().join("craftplan.db");

    craftplan_cmd(&database)
        .write_stdin("abc\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: 'abc' is not a valid number. Try again.",
        ))
        // The loop keeps going after the error
        .stdout(predicate::str::contains("Projects"));
}
