// Tests for the built-in question banks

use greenroom::QuestionSet;

#[test]
fn test_builtin_lookup_is_case_insensitive() {
    let set = QuestionSet::builtin("Amazon").unwrap();
    assert_eq!(set.company, "amazon");
    assert_eq!(set.len(), 5);

    let set = QuestionSet::builtin("  T-MOBILE ").unwrap();
    assert_eq!(set.company, "t-mobile");
}

#[test]
fn test_unknown_company_has_no_bank() {
    assert!(QuestionSet::builtin("globex").is_none());
}

#[test]
fn test_all_banks_have_five_ordered_questions() {
    let companies = QuestionSet::companies();
    assert_eq!(companies.len(), 5);

    for company in companies {
        let set = QuestionSet::builtin(company).unwrap();
        assert_eq!(set.len(), 5, "{} bank should have 5 questions", company);
        assert!(set.get(0).is_some());
        assert!(set.get(5).is_none());
    }
}

#[test]
fn test_custom_question_set() {
    let set = QuestionSet::new(
        "acme",
        vec!["One?".to_string(), "Two?".to_string()],
    );

    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
    assert_eq!(set.get(0), Some("One?"));
    assert_eq!(set.get(1), Some("Two?"));
    assert_eq!(set.get(2), None);
    assert_eq!(set.questions().len(), 2);
}
