use std::collections::HashMap;

use post_scorer::analyze;
use post_scorer::templates::{default_templates, find_template, TemplateError};

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn catalog_ids_are_sequential() {
    let ids: Vec<&str> = default_templates().iter().map(|template| template.id).collect();
    assert_eq!(
        ids,
        vec!["default-0", "default-1", "default-2", "default-3", "default-4"]
    );
    for template in default_templates() {
        for placeholder in template.placeholders {
            assert!(
                template.template.contains(&format!("{{{{{}}}}}", placeholder.key)),
                "{} is missing {}",
                template.id,
                placeholder.key
            );
        }
    }
}

#[test]
fn unknown_id_is_not_found() {
    assert_eq!(
        find_template("default-9").unwrap_err(),
        TemplateError::NotFound("default-9".to_string())
    );
    assert!(find_template("hot-take").is_err());
}

#[test]
fn renders_placeholders() {
    let template = find_template("default-2").unwrap();
    let rendered = template
        .render(&values(&[
            ("opinion", "tabs are fine"),
            ("reason", " Consistency matters more than the character. "),
        ]))
        .unwrap();
    assert_eq!(
        rendered,
        "Unpopular opinion: tabs are fine\n\nConsistency matters more than the character.\n\nChange my mind."
    );
    assert!(analyze(&rendered, 0)
        .algorithm_signals
        .has_positive("controversy"));
}

#[test]
fn missing_required_value_is_an_error() {
    let template = find_template("default-0").unwrap();
    assert_eq!(
        template.render(&values(&[("topic", "estimation")])),
        Err(TemplateError::MissingValue("supporting_point"))
    );
    assert_eq!(
        template.render(&values(&[("topic", "  "), ("supporting_point", "x")])),
        Err(TemplateError::MissingValue("topic"))
    );
}

#[test]
fn serializes_like_the_api() {
    let json = serde_json::to_value(find_template("default-1").unwrap()).unwrap();
    assert_eq!(json["category"], "thread_starter");
    assert_eq!(json["expectedScore"], 82);
    assert_eq!(json["placeholders"][2]["type"], "number");
    assert_eq!(json["targetEngagement"][0], "retweets");
}
