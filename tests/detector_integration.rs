mod common;

use lingram::{Detector, DetectorConfig, LanguageIndex, LingramError, SharedIndex};
use std::sync::Arc;

fn config_for(dir: &std::path::Path) -> DetectorConfig {
    DetectorConfig {
        model_dir: Some(dir.to_path_buf()),
        ..DetectorConfig::default()
    }
}

#[test]
fn detects_held_out_sentences() {
    let dir = common::model_dir();
    let detector = Detector::from_config(&config_for(dir.path())).unwrap();
    assert_eq!(detector.index().languages(), &["de", "en", "fr", "ru"]);

    let cases = [
        ("en", "The children said that they would like to play in the garden with their friends."),
        ("de", "Die Kinder sagten, dass sie mit ihren Freunden im Garten spielen wollen."),
        ("fr", "Les enfants ont dit qu'ils voudraient jouer dans le jardin avec leurs amis."),
        ("ru", "Дети сказали, что они хотели бы играть в саду со своими друзьями."),
    ];
    for (expected, text) in cases {
        let det = detector.detect(text);
        assert_eq!(det.language, expected, "text: {text}");
        assert!(!det.fallback);
        assert!(det.score > 0.0 && det.score <= 1.0 + 1e-9);
    }
}

#[test]
fn latin_noise_inside_cyrillic_text() {
    let dir = common::model_dir();
    let detector = Detector::from_config(&config_for(dir.path())).unwrap();
    let text = "Вечером мы купили новый ноутбук Lenovo ThinkPad и говорили о работе.";
    assert_eq!(detector.detect_language(text), "ru");
}

#[test]
fn short_input_returns_default() {
    let dir = common::model_dir();
    let cfg = DetectorConfig {
        default_language: "de".into(),
        ..config_for(dir.path())
    };
    let detector = Detector::from_config(&cfg).unwrap();
    assert_eq!(detector.detect_language(""), "de");
    assert_eq!(detector.detect_language("ab"), "de");
    assert!(detector.detect("ab").fallback);
}

#[test]
fn detection_is_repeatable() {
    let dir = common::model_dir();
    let detector = Detector::from_config(&config_for(dir.path())).unwrap();
    let text = "le the der";
    let first = detector.detect(text);
    for _ in 0..200 {
        let det = detector.detect(text);
        assert_eq!(det.language, first.language);
        assert_eq!(det.score.to_bits(), first.score.to_bits());
        assert_eq!(det.fallback, first.fallback);
    }
}

#[test]
fn concurrent_detection_shares_one_index() {
    let index = Arc::new(LanguageIndex::build(common::models()).unwrap());
    let detector = Detector::new(index.clone(), &DetectorConfig::default());
    std::thread::scope(|s| {
        for _ in 0..4 {
            let d = detector.clone();
            s.spawn(move || {
                assert_eq!(
                    d.detect_language("The family was sitting in the garden."),
                    "en"
                );
            });
        }
    });
    // Detector clones plus the local handle
    assert!(Arc::strong_count(&index) >= 2);
}

#[test]
fn shared_index_initializes_once() {
    let dir = common::model_dir();
    let cfg = config_for(dir.path());
    let shared = SharedIndex::new();
    let a = Detector::from_shared(&shared, &cfg).unwrap();
    let b = Detector::from_shared(&shared, &cfg).unwrap();
    assert!(Arc::ptr_eq(a.index(), b.index()));
}

#[test]
fn missing_model_file_aborts_initialization() {
    let dir = common::model_dir();
    // Unlistable directory: the static list is used and its files are absent
    let cfg = DetectorConfig {
        model_dir: Some(dir.path().join("missing")),
        fallback_languages: Some(vec!["en".into(), "fr".into()]),
        ..DetectorConfig::default()
    };
    let err = Detector::from_config(&cfg).unwrap_err();
    assert!(matches!(err, LingramError::Configuration(_)));
}

#[test]
fn malformed_model_aborts_initialization() {
    let dir = common::model_dir();
    std::fs::write(
        common::model_path(dir.path(), "xx"),
        "abc_DELIMITER_0.5_ENDLINE_\nbroken record_ENDLINE_\n",
    )
    .unwrap();
    let err = Detector::from_config(&config_for(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        LingramError::MalformedModel { ref language, record: 2, .. } if language == "xx"
    ));
}
