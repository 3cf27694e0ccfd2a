use super::*;

#[test]
fn file_name_uses_date_or_default() {
    let mut entry = DiaryEntry {
        date: Some("2024-05-05".to_string()),
        ..DiaryEntry::default()
    };
    assert_eq!(entry.file_name("today"), "diary_2024-05-05.png");

    entry.date = Some("   ".to_string());
    assert_eq!(entry.file_name("today"), "diary_today.png");
    entry.date = None;
    assert_eq!(entry.file_name("today"), "diary_today.png");
}

#[test]
fn file_name_strips_path_separators() {
    let entry = DiaryEntry {
        date: Some("2024/05/05 ../x".to_string()),
        ..DiaryEntry::default()
    };
    assert_eq!(entry.file_name("today"), "diary_2024-05-05 ..-x.png");
    assert_eq!(sanitize_file_component("a:b*c?\n"), "a-b-c-");
}

#[test]
fn weather_parses_labels_case_insensitively() {
    assert_eq!("rainy".parse::<Weather>().unwrap(), Weather::Rainy);
    assert_eq!(" Windy ".parse::<Weather>().unwrap(), Weather::Windy);
    assert!(matches!(
        "hail".parse::<Weather>().unwrap_err(),
        DiaryError::InvalidInput(_)
    ));
    for w in Weather::ALL {
        assert_eq!(w.to_string().parse::<Weather>().unwrap(), w);
    }
}

#[test]
fn entry_deserializes_with_defaults() {
    let entry: DiaryEntry = serde_json::from_str(r#"{ "weather": "snowy" }"#).unwrap();
    assert_eq!(entry.weather, Weather::Snowy);
    assert_eq!(entry.date, None);
    assert!(entry.body.is_empty());
}
