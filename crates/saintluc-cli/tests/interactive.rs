use std::io::Cursor;

use saintluc_cli::session::run_interactive;
use saintluc_scoring::variant::Variant;

fn run(script: &str, variant: Variant) -> (usize, String) {
    let mut out = Vec::new();
    let shown = run_interactive(Cursor::new(script.to_string()), &mut out, variant)
        .expect("session runs");
    (shown, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn full_round_prints_result() {
    let (shown, out) = run("60\n1\n1\n2\n0\n13\nquit\n", Variant::En);
    assert_eq!(shown, 1);
    assert!(out.starts_with("Saint Luc Score\n"));
    assert!(out.contains("Score: -5.525\nPost-operative blood test NOT NECESSARY\n"));
}

#[test]
fn option_labels_are_accepted() {
    let (shown, out) = run("40\nfemale\nArthritis\n1\nyes\n10\n", Variant::En);
    assert_eq!(shown, 1);
    assert!(out.contains("Score: -3.669\nPost-operative blood test NECESSARY\n"));
}

#[test]
fn invalid_answer_is_asked_again() {
    let (shown, out) = run("sixty\n60\n5\n1\n1\n2\n0\n13\n", Variant::En);
    assert_eq!(shown, 1);
    assert!(out.contains("age: 'sixty' is not a number"));
    assert!(out.contains("gender: 5 is not allowed (expected 0 or 1)"));
    assert_eq!(out.matches("Age: ").count(), 3);
}

#[test]
fn empty_answer_is_required() {
    let (_, out) = run("\n60\n", Variant::En);
    assert!(out.contains("age: value is required"));
}

#[test]
fn reset_starts_over() {
    let (shown, out) = run("60\n1\nreset\n40\n0\n0\n1\n1\n10\n", Variant::En);
    assert_eq!(shown, 1);
    assert!(out.contains("-- Reset --"));
    assert!(out.contains("-3.669"));
    assert!(!out.contains("-5.525"));
}

#[test]
fn several_patients_in_one_session() {
    let script = "60\n1\n1\n2\n0\n13\n40\n0\n0\n1\n1\n10\nq\n";
    let (shown, out) = run(script, Variant::En);
    assert_eq!(shown, 2);
    assert!(out.contains("-5.525"));
    assert!(out.contains("-3.669"));
}

#[test]
fn french_variant_wording() {
    let (shown, out) = run("40\nFemme\nArthrose\n1\nOui\n10\n", Variant::Fr);
    assert_eq!(shown, 1);
    assert!(out.contains("Sexe [1 = Homme, 0 = Femme]: "));
    assert!(out.contains("Bilan sanguin post-opératoire NÉCESSAIRE"));
}

#[test]
fn end_of_input_mid_form_shows_nothing() {
    let (shown, out) = run("60\n1\n", Variant::En);
    assert_eq!(shown, 0);
    assert!(!out.contains("Score:"));
}
