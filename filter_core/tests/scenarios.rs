use filter_core::{
    Field, FilterClause, FilterCommand, FilterController, FilterError, Operator, RowSet,
    RowSource, Severity,
};

const ACTIVE_ROW: [&str; 8] = ["", "SN123", "ModelX", "", "AcmeCo", "Active", "", "2024-01-01"];
const CLOSED_ROW: [&str; 8] = ["", "SN777", "Bass12", "", "Globex", "Closed", "", "2023-11-30"];

fn request_rows() -> RowSet {
    let mut rows = RowSet::new();
    rows.push_row(ACTIVE_ROW);
    rows
}

fn set_clauses(controller: &mut FilterController, clauses: &[FilterClause]) {
    let list = controller.clauses_mut();
    list.reset();
    for (idx, clause) in clauses.iter().enumerate() {
        let id = if idx == 0 {
            list.ids()[0]
        } else {
            list.add_clause()
        };
        *list.clause_mut(id).unwrap() = clause.clone();
    }
}

fn apply(controller: &mut FilterController, rows: &mut RowSet) -> Result<usize, FilterError> {
    controller.apply_all(&mut [rows])
}

#[test]
fn status_equals_is_case_insensitive() {
    let mut rows = request_rows();
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Status, Operator::Equals, "active")],
    );
    assert_eq!(apply(&mut controller, &mut rows), Ok(1));
}

#[test]
fn dealer_contains() {
    let mut rows = request_rows();
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Dealer, Operator::Contains, "acme")],
    );
    assert_eq!(apply(&mut controller, &mut rows), Ok(1));
}

#[test]
fn status_mismatch_hides_row() {
    let mut rows = request_rows();
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Status, Operator::Equals, "closed")],
    );
    assert_eq!(apply(&mut controller, &mut rows), Ok(0));
    assert_eq!(rows.visible_count(), 0);
}

#[test]
fn two_true_clauses_match() {
    let mut rows = request_rows();
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[
            FilterClause::new(Field::Status, Operator::Equals, "active"),
            FilterClause::new(Field::Model, Operator::StartsWith, "modelx"),
        ],
    );
    assert_eq!(apply(&mut controller, &mut rows), Ok(1));
}

#[test]
fn apply_without_active_clause_warns_and_keeps_visibility() {
    let mut rows = request_rows();
    rows.push_row(CLOSED_ROW);
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Status, Operator::Equals, "closed")],
    );
    assert_eq!(apply(&mut controller, &mut rows), Ok(1));
    let before: Vec<_> = rows.visible_rows().collect();

    set_clauses(
        &mut controller,
        &[
            FilterClause::new(Field::Status, Operator::Equals, ""),
            FilterClause::new(Field::Dealer, Operator::Contains, "   "),
        ],
    );
    let notification = controller
        .dispatch(FilterCommand::ApplyAll, &mut [&mut rows])
        .unwrap();
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.message, "Fill in at least one filter");
    assert_eq!(rows.visible_rows().collect::<Vec<_>>(), before);
}

#[test]
fn clear_shows_everything_and_resets_clauses() {
    let mut rows = request_rows();
    rows.push_row(CLOSED_ROW);
    let mut mini = RowSet::new();
    mini.push_row(["", "SN123", "ModelX"]);

    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[
            FilterClause::new(Field::Dealer, Operator::EndsWith, "zz"),
            FilterClause::new(Field::Serial, Operator::Contains, "1"),
        ],
    );
    controller
        .dispatch(FilterCommand::ApplyAll, &mut [&mut rows, &mut mini])
        .unwrap();
    assert_eq!(rows.visible_count() + mini.visible_count(), 0);

    let notification = controller
        .dispatch(FilterCommand::ClearAll, &mut [&mut rows, &mut mini])
        .unwrap();
    assert_eq!(notification.severity, Severity::Info);
    assert_eq!(notification.message, "Filters cleared, showing 3 records");
    assert_eq!(rows.visible_count(), 2);
    assert_eq!(mini.visible_count(), 1);
    assert_eq!(controller.clauses().len(), 1);
    let (_, clause) = controller.clauses().iter().next().unwrap();
    assert_eq!(clause, &FilterClause::default());
}

#[test]
fn apply_reports_count_across_tables() {
    let mut rows = request_rows();
    rows.push_row(CLOSED_ROW);
    let mut mini = RowSet::new();
    mini.push_row(["", "SN123", "ModelX"]);
    mini.push_row(["", "SN777"]);

    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Serial, Operator::EndsWith, "777")],
    );
    let notification = controller
        .dispatch(FilterCommand::ApplyAll, &mut [&mut rows, &mut mini])
        .unwrap();
    assert_eq!(notification, filter_core::Notification::records_found(2));
    assert_eq!(notification.message, "Found records: 2");
}

#[test]
fn apply_twice_is_idempotent() {
    let mut rows = request_rows();
    rows.push_row(CLOSED_ROW);
    let mut controller = FilterController::default();
    set_clauses(
        &mut controller,
        &[FilterClause::new(Field::Date, Operator::StartsWith, "2024")],
    );
    apply(&mut controller, &mut rows).unwrap();
    let once: Vec<_> = rows.visible_rows().collect();
    apply(&mut controller, &mut rows).unwrap();
    assert_eq!(rows.visible_rows().collect::<Vec<_>>(), once);
}
