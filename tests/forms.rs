use distcalc::*;
use serde_json::json;

fn to_value<T: serde::Serialize>(v: &T) -> serde_json::Value {
    serde_json::from_str(&serde_json::to_string(v).unwrap()).unwrap()
}

#[test]
fn selecting_a_type_shows_only_its_block() {
    let mut form = ParametersForm::default();
    for index in 0..SLOT_COUNT {
        assert!(form.set_distribution_type(index, DistributionType::Exponential));
        assert_eq!(form.visible_block(index), Some(ParamBlock::Exponential));
        assert!(!form.slots[index].is_visible(ParamBlock::Normal));

        assert!(form.set_distribution_type(index, DistributionType::Normal));
        assert_eq!(form.visible_block(index), Some(ParamBlock::Normal));
        assert!(!form.slots[index].is_visible(ParamBlock::Exponential));
    }
}

#[test]
fn type_change_only_affects_its_slot() {
    let mut form = ParametersForm::default();
    form.set_distribution_type(2, DistributionType::Exponential);
    assert_eq!(form.visible_block(0), Some(ParamBlock::Normal));
    assert_eq!(form.visible_block(1), Some(ParamBlock::Normal));
    assert_eq!(form.visible_block(2), Some(ParamBlock::Exponential));
    assert_eq!(form.visible_block(3), Some(ParamBlock::Normal));
}

#[test]
fn unknown_slot_is_ignored() {
    let mut form = ParametersForm::default();
    let before = form.clone();
    assert!(!form.set_distribution_type(SLOT_COUNT, DistributionType::Exponential));
    assert_eq!(form, before);
    assert_eq!(form.visible_block(SLOT_COUNT), None);
}

#[test]
fn calc_type_toggles_input_groups() {
    let mut form = CalculationsForm::default();
    form.set_calc_type(CalcType::XRange);
    assert_eq!(form.visible_inputs(), CalcInputs::XRange);
    form.set_calc_type(CalcType::YValue);
    assert_eq!(form.visible_inputs(), CalcInputs::YValue);
}

#[test]
fn hidden_block_keeps_its_text() {
    let mut form = ParametersForm::default();
    form.slots[1].mean = "4".into();
    form.set_distribution_type(1, DistributionType::Exponential);
    form.set_distribution_type(1, DistributionType::Normal);
    assert_eq!(form.slots[1].mean, "4");
}

#[test]
fn normal_slot_builds_mean_and_std() {
    let mut form = ParametersForm::default();
    form.slots[0].mean = "5".into();
    form.slots[0].std = "2".into();

    let parsed = form.build();
    assert!(parsed.is_clean());
    let body = to_value(&parsed.value);
    assert_eq!(body["0"], json!({"type": "normal", "params": {"mean": 5, "std": 2}}));
    assert_eq!(
        serde_json::to_string(&parsed.value.get(0).unwrap()).unwrap(),
        r#"{"type":"normal","params":{"mean":5,"std":2}}"#
    );
}

#[test]
fn exponential_slot_builds_lambda_only() {
    let mut form = ParametersForm::default();
    form.set_distribution_type(0, DistributionType::Exponential);
    form.slots[0].lambda = "1.5".into();
    form.slots[0].mean = "ignored".into();

    let parsed = form.build();
    assert!(parsed.is_clean());
    assert_eq!(
        serde_json::to_string(&parsed.value.get(0).unwrap()).unwrap(),
        r#"{"type":"exponential","params":{"lambda":1.5}}"#
    );
}

#[test]
fn parameter_set_covers_all_slots_with_string_keys() {
    let body = to_value(&ParametersForm::default().build().value);
    let obj = body.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["0", "1", "2", "3"]);
    assert_eq!(body["3"], json!({"type": "normal", "params": {"mean": 0, "std": 1}}));
}

#[test]
fn unreadable_parameters_become_null_and_are_flagged() {
    let mut form = ParametersForm::default();
    form.slots[2].std = "wide".into();
    form.set_distribution_type(3, DistributionType::Exponential);
    form.slots[3].lambda = String::new();

    let parsed = form.build();
    assert_eq!(parsed.unparsed, vec!["std-2".to_string(), "lambda-3".to_string()]);
    let body = to_value(&parsed.value);
    assert_eq!(body["2"]["params"]["std"], serde_json::Value::Null);
    assert_eq!(body["3"]["params"]["lambda"], serde_json::Value::Null);
}

#[test]
fn prefilled_form_shows_stored_values() {
    let mut set = ParameterSet::new();
    set.insert(0, ParameterEntry::normal(1.5, 0.5));
    set.insert(1, ParameterEntry::exponential(2.0));
    let form = ParametersForm::from_parameter_set(&set);

    assert_eq!(form.slots[0].mean, "1.5");
    assert_eq!(form.slots[0].std, "0.5");
    assert_eq!(form.visible_block(1), Some(ParamBlock::Exponential));
    assert_eq!(form.slots[1].lambda, "2");
    // Missing slots fall back to the standard normal.
    assert_eq!(form.slots[2].mean, "0");
    assert_eq!(form.slots[2].std, "1");
}

#[test]
fn combination_parses_whitespace_separated_tokens() {
    assert_eq!(parse_combination("1 2 3"), vec![1.0, 2.0, 3.0]);
    let mixed = parse_combination("1 x 3");
    assert_eq!(mixed.len(), 3);
    assert_eq!(mixed[0], 1.0);
    assert!(mixed[1].is_nan());
    assert_eq!(mixed[2], 3.0);
    assert_eq!(parse_combination("  0\t1  "), vec![0.0, 1.0]);
    assert!(parse_combination("").is_empty());
}

#[test]
fn x_range_request_carries_bounds_only() {
    let form = CalculationsForm {
        calc_type: CalcType::XRange,
        combination: "0 1".into(),
        x_min: "-1".into(),
        x_max: "2.5".into(),
        y: "0.9".into(),
    };
    let parsed = form.build();
    assert!(parsed.is_clean());
    assert_eq!(
        serde_json::to_string(&parsed.value).unwrap(),
        r#"{"combination":[0,1],"calc_type":"x","x_min":-1,"x_max":2.5}"#
    );
}

#[test]
fn y_value_request_carries_y_only() {
    let form = CalculationsForm {
        calc_type: CalcType::YValue,
        combination: "2".into(),
        x_min: "-1".into(),
        x_max: "1".into(),
        y: "0.95".into(),
    };
    let parsed = form.build();
    assert_eq!(parsed.value.calc_type(), CalcType::YValue);
    assert_eq!(
        serde_json::to_string(&parsed.value).unwrap(),
        r#"{"combination":[2],"calc_type":"y","y":0.95}"#
    );
}

#[test]
fn unreadable_combination_tokens_are_sent_as_null() {
    let form = CalculationsForm {
        calc_type: CalcType::YValue,
        combination: "1 x 3".into(),
        y: "".into(),
        ..Default::default()
    };
    let parsed = form.build();
    assert_eq!(
        parsed.unparsed,
        vec!["combination[1]".to_string(), "y-value".to_string()]
    );
    assert_eq!(
        serde_json::to_string(&parsed.value).unwrap(),
        r#"{"combination":[1,null,3],"calc_type":"y","y":null}"#
    );
}

#[test]
fn infinite_values_are_flagged_like_unreadable_ones() {
    let mut form = ParametersForm::default();
    form.slots[0].mean = "1e999".into();
    form.slots[1].std = "Infinity".into();

    let parsed = form.build();
    assert_eq!(parsed.unparsed, vec!["mean-0".to_string(), "std-1".to_string()]);
    let body = to_value(&parsed.value);
    assert_eq!(body["0"]["params"]["mean"], serde_json::Value::Null);
    assert_eq!(body["1"]["params"]["std"], serde_json::Value::Null);

    let form = CalculationsForm {
        calc_type: CalcType::XRange,
        combination: "1 -Infinity".into(),
        x_min: "0".into(),
        x_max: "1e400".into(),
        y: String::new(),
    };
    assert_eq!(
        form.build().unparsed,
        vec!["combination[1]".to_string(), "x-max".to_string()]
    );
}
