use quotecraft::{explain_match, match_template, TemplateId};

#[test]
fn scenario_inputs_pick_expected_templates() {
    assert_eq!(match_template("God is good"), TemplateId::DevotionClassic);
    assert_eq!(match_template("Hustle and grow your business"), TemplateId::BusinessPro);
    assert_eq!(match_template("Be kind today"), TemplateId::MotivationBlue);
}

#[test]
fn devotional_keywords_take_priority() {
    assert_eq!(match_template("church success"), TemplateId::DevotionClassic);
    assert_eq!(match_template("Lead your team in prayer"), TemplateId::DevotionClassic);
}

#[test]
fn matching_is_deterministic() {
    let inputs = ["", "hello world", "Amen", "Market strategy", "Psalm 23"];
    for text in inputs {
        assert_eq!(match_template(text), match_template(text), "{:?}", text);
    }
}

#[test]
fn report_names_the_deciding_keyword() {
    let report = explain_match("Set a goal and chase it");
    assert_eq!(report.template, TemplateId::BusinessPro);
    assert_eq!(report.keyword, Some("goal"));

    let report = explain_match("Rest your soul");
    assert_eq!(report.keyword, Some("soul"));
}

#[test]
fn empty_text_uses_default() {
    assert_eq!(match_template(""), TemplateId::default());
    assert_eq!(explain_match("   ").keyword, None);
}
