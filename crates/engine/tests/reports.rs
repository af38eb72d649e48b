use engine::{Ledger, report};

const USER: u64 = 42;

#[test]
fn category_view_lists_id_amount_description() {
    let mut ledger = Ledger::new();
    let id = ledger.add(USER, 12.5, "food", "lunch", None);
    ledger.add(USER, 3.0, "bar", "coffee", None);

    let view = report::category_view("food", &ledger.by_category(USER, "food"));
    assert!(view.starts_with("Expenses for category food:\n\n"));
    assert!(view.contains(&format!("ID: {id}, Amount: 12.5, Description: lunch")));
    assert!(!view.contains("coffee"));
}

#[test]
fn category_view_none_found_is_distinct_from_no_expenses() {
    let mut ledger = Ledger::new();
    ledger.add(USER, 3.0, "bar", "coffee", None);

    let view = report::category_view("food", &ledger.by_category(USER, "food"));
    assert_eq!(view, "No expenses found for category food.");
}

#[test]
fn month_view_includes_the_category_column() {
    let mut ledger = Ledger::new();
    let id = ledger.add(USER, 12.5, "food", "lunch", None);
    let period = ledger.expenses(USER)[0].period.clone();

    let view = report::month_view(&period, &ledger.by_month(USER, &period));
    assert!(view.starts_with(&format!("Expenses for {period}:\n\n")));
    assert!(view.contains(&format!(
        "ID: {id}, Amount: 12.5, Category: food, Description: lunch"
    )));
}

#[test]
fn month_view_none_found_names_the_period() {
    let ledger = Ledger::new();
    let view = report::month_view("2024-05", &ledger.by_month(USER, "2024-05"));
    assert_eq!(view, "No expenses found for 2024-05.");
}

#[test]
fn monthly_report_sums_per_category_within_a_period() {
    let mut ledger = Ledger::new();
    ledger.add(USER, 50.0, "food", "lunch", None);
    ledger.add(USER, 30.0, "food", "dinner", None);

    let text = report::monthly_report(ledger.expenses(USER));
    assert!(text.starts_with("Monthly Expense Report:\n\n"));
    assert_eq!(text.matches("Month: ").count(), 1);
    assert!(text.contains("food: 80\n"));
}

#[test]
fn monthly_report_keeps_first_encountered_category_order() {
    let mut ledger = Ledger::new();
    ledger.add(USER, 10.0, "transport", "bus", None);
    ledger.add(USER, 50.0, "food", "lunch", None);
    ledger.add(USER, 5.0, "transport", "tram", None);

    let text = report::monthly_report(ledger.expenses(USER));
    let transport = text.find("transport: 15").unwrap();
    let food = text.find("food: 50").unwrap();
    assert!(transport < food);
}

#[test]
fn limits_view_lists_pairs_in_insertion_order() {
    let mut ledger = Ledger::new();
    ledger.set_limit("food", 40.0);
    ledger.set_limit("bar", 15.5);

    let view = report::limits_view(ledger.limits());
    assert_eq!(view, "Current category limits:\nfood: 40\nbar: 15.5\n");
}

#[test]
fn limits_view_reports_none_set() {
    let ledger = Ledger::new();
    assert_eq!(report::limits_view(ledger.limits()), "No category limits set.");
}
