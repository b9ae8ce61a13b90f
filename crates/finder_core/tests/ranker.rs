use std::sync::Once;

use finder_core::{
    rank, top_n, ConversionError, CurrencyConverter, NoConversion, RawVacancy, VacancyError,
    DEFAULT_TOP_N,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(finder_logging::initialize_for_tests);
}

fn vacancy(name: &str, from: Option<u64>, to: Option<u64>) -> RawVacancy {
    json!({
        "name": name,
        "link": format!("https://hh.ru/vacancy/{}", name.len()),
        "salary": {"from": from, "to": to, "currency": "RUR"},
        "area": "Москва",
    })
    .as_object()
    .cloned()
    .unwrap()
}

struct Times100;
impl CurrencyConverter for Times100 {
    fn convert(&self, amount: u64, _currency: &str) -> Result<u64, ConversionError> {
        Ok(amount * 100)
    }
}

fn titles(records: &[finder_core::Record]) -> Vec<&str> {
    records.iter().map(|record| record.title()).collect()
}

#[test]
fn top_n_orders_by_salary_descending() {
    init_logging();
    let raw = vec![
        vacancy("low", Some(10), Some(20)),
        vacancy("high", Some(300), None),
        vacancy("none", None, None),
        vacancy("mid", Some(100), Some(100)),
    ];

    let top = top_n(&raw, 3, &NoConversion).unwrap();
    assert_eq!(titles(&top), vec!["high", "mid", "low"]);
    assert!(top.windows(2).all(|pair| pair[0].salary() >= pair[1].salary()));
}

#[test]
fn ties_keep_input_order() {
    init_logging();
    let raw = vec![
        vacancy("first", Some(100), None),
        vacancy("second", None, Some(100)),
        vacancy("third", Some(50), Some(50)),
        vacancy("best", Some(500), None),
    ];

    let top = top_n(&raw, DEFAULT_TOP_N, &NoConversion).unwrap();
    assert_eq!(titles(&top), vec!["best", "first", "second", "third"]);
}

#[test]
fn n_larger_than_input_returns_everything() {
    init_logging();
    let raw = vec![vacancy("a", Some(1), None), vacancy("b", Some(2), None)];
    assert_eq!(top_n(&raw, 10, &NoConversion).unwrap().len(), 2);
    assert!(top_n(&raw, 0, &NoConversion).unwrap().is_empty());
}

#[test]
fn empty_input_gives_empty_output() {
    init_logging();
    for n in [0, 1, DEFAULT_TOP_N, 100] {
        assert!(top_n(&[], n, &NoConversion).unwrap().is_empty());
    }
    assert!(rank(Vec::new(), 3).is_empty());
}

#[test]
fn converted_salaries_compete_with_base_currency() {
    init_logging();
    let mut dollars = vacancy("dollars", Some(10), Some(30));
    dollars.insert(
        "salary".into(),
        json!({"from": 10, "to": 30, "currency": "USD"}),
    );
    let raw = vec![vacancy("roubles", Some(1000), None), dollars];

    let top = top_n(&raw, 1, &Times100).unwrap();
    assert_eq!(titles(&top), vec!["dollars"]);
    assert_eq!(top[0].salary(), 2000);
}

#[test]
fn one_invalid_record_fails_the_batch() {
    init_logging();
    let mut broken = vacancy("broken", Some(1), None);
    broken.insert("link".into(), json!("nowhere"));
    let raw = vec![vacancy("ok", Some(1), None), broken];

    assert!(matches!(
        top_n(&raw, 5, &NoConversion),
        Err(VacancyError::InvalidUrl { .. })
    ));
}
