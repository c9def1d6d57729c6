mod common;

use common::{builtin_classifier, write_campaign, V1};
use tema_lib::batch::{classify_comments, read_comments, render, DEFAULT_COMMENT_FIELD};
use tema_lib::{Campaign, Config, InputFormat, LabelCounts, OutputFormat};

const COMMENTS: &str = "Nutritivas??? Solo azúcar
Mejore esas instalaciones
AMÉN. Gloria a Dios.
Rico, me encanta
";

#[test]
fn test_tsv_output() {
    let classifier = builtin_classifier(V1);
    let comments = read_comments(COMMENTS.as_bytes(), InputFormat::Lines, DEFAULT_COMMENT_FIELD).unwrap();
    let records = classify_comments(&classifier, comments);

    insta::assert_snapshot!(render(&records, OutputFormat::Tsv).unwrap(), @r"
    label	comment
    Ingredientes y Salud	Nutritivas??? Solo azúcar
    Situación de Planta y Laboral	Mejore esas instalaciones
    Fuera de Tema / No Relevante	AMÉN. Gloria a Dios.
    Opinión General del Producto	Rico, me encanta
    ");
}

#[test]
fn test_csv_output_quotes_commas() {
    let classifier = builtin_classifier(V1);
    let records = classify_comments(&classifier, vec!["Rico, me encanta".to_string()]);

    insta::assert_snapshot!(render(&records, OutputFormat::Csv).unwrap(), @r#"
    label,comment
    Opinión General del Producto,"Rico, me encanta"
    "#);
}

#[test]
fn test_json_input_with_nulls() {
    let classifier = builtin_classifier(V1);
    let json = r#"[{"comment": "Platano"}, {"comment": null}, "puro azúcar y quimicos", 7]"#;
    let comments = read_comments(json.as_bytes(), InputFormat::Json, DEFAULT_COMMENT_FIELD).unwrap();
    let records = classify_comments(&classifier, comments);

    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Fuera de Tema / No Relevante",
            "Fuera de Tema / No Relevante",
            "Ingredientes y Salud",
            "Fuera de Tema / No Relevante",
        ]
    );
}

#[test]
fn test_report_counts() {
    let classifier = builtin_classifier(V1);
    let comments = read_comments(COMMENTS.as_bytes(), InputFormat::Lines, DEFAULT_COMMENT_FIELD).unwrap();
    let counts = LabelCounts::from_comments(&classifier, &comments);

    assert_eq!(counts.total(), 4);
    assert_eq!(counts.get("Preguntas sobre el Producto"), 0);
    assert_eq!(counts.get("Fuera de Tema / No Relevante"), 1);
    assert_eq!(counts.entries().len(), 6);
}

#[test]
fn test_custom_campaign_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_campaign(
        dir.path(),
        "kefir.toml",
        r#"
            [campaign]
            id = "kefir"
            campaign_name = "Alpina - Kéfir"
            product = "Kéfir Alpina"
            categories = [
                "Comparación con Kéfir Casero/Artesanal",
                "Ingredientes y Salud",
                "Fuera de Tema / No Relevante",
                "Sin clasificar",
            ]
            version = "1.0"
            last_updated = "2025-11-20"

            [rule_set]
            fallback_label = "Sin clasificar"
            short_comment_threshold = 3

            [[rule_set.rules]]
            label = "Comparación con Kéfir Casero/Artesanal"
            keywords = ["casero", "artesanal", "búlgaros"]

            [[rule_set.rules]]
            label = "Ingredientes y Salud"
            keywords = ["az[uú]car"]

            [[rule_set.rules]]
            label = "Fuera de Tema / No Relevante"
            keywords = ["dios"]
            short_comments = true
        "#,
    );

    let config = Config::new(None, Some(path.clone())).unwrap();
    let campaign = config.load_campaign().unwrap();
    assert_eq!(campaign.id(), "kefir");
    assert!(campaign.category_issues().is_empty());

    let classifier = campaign.classifier().unwrap();
    assert_eq!(classifier.classify("Yo lo hago casero"), "Comparación con Kéfir Casero/Artesanal");
    assert_eq!(classifier.classify("muy buena bebida"), "Sin clasificar");
    assert_eq!(classifier.classify("buena bebida"), "Fuera de Tema / No Relevante");

    let reloaded = Campaign::from_file(&path).unwrap();
    assert_eq!(reloaded.rule_set, campaign.rule_set);
}

#[test]
fn test_invalid_campaign_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_campaign(
        dir.path(),
        "broken.toml",
        r#"
            [campaign]
            id = "broken"
            campaign_name = "Broken"
            product = "Broken"
            version = "1"
            last_updated = "2025-11-20"

            [[rule_set.rules]]
            label = "Roto"
            keywords = ["(sin cerrar"]
        "#,
    );

    let campaign = Campaign::from_file(&path).unwrap();
    let err = campaign.classifier().unwrap_err();
    assert!(err.to_string().contains("Roto"));
}
