use super::*;
use fieldguard_protocols::{
    BoundingBox, ElementData, Geometry, RawStyle, ReasonCode, MAIN_PAGE_LOCATION,
};

fn hidden(tag: &str, name: &str) -> ElementData {
    ElementData::new(tag)
        .with_attr("name", name)
        .with_style(RawStyle {
            visibility: Some("hidden".into()),
            ..Default::default()
        })
}

fn static_options() -> EnumerationOptions {
    EnumerationOptions::new(Strictness::Static)
}

#[test]
fn test_empty_document_has_no_findings() {
    let doc = Document::new("https://example.com");
    assert!(enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options()).is_empty());
}

#[test]
fn test_visible_fields_are_not_reported() {
    let mut doc = Document::new("https://example.com");
    let form = doc.push(None, ElementData::new("form"));
    doc.push(Some(form), ElementData::new("input").with_attr("name", "email"));
    doc.push(None, ElementData::new("textarea"));
    assert!(enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options()).is_empty());
}

#[test]
fn test_form_bound_finding() {
    let mut doc = Document::new("https://example.com");
    let form = doc.push(None, ElementData::new("form").with_attr("action", "/checkout"));
    doc.push(Some(form), hidden("input", "cc-number").with_attr("type", "tel"));

    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options());
    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.name.as_deref(), Some("cc-number"));
    assert_eq!(finding.field_type, "tel");
    assert_eq!(
        finding.reason,
        FindingReason::Style {
            code: ReasonCode::VisibilityHidden
        }
    );
    assert_eq!(finding.location, "main page");
    assert_eq!(finding.selector, "form[action=\"/checkout\"] input[name=\"cc-number\"]");
    assert_eq!(finding.qualifier, None);
    assert_eq!(finding.bounding_box, None);
}

#[test]
fn test_orphan_is_qualified() {
    let mut doc = Document::new("https://example.com");
    doc.push(None, hidden("select", "country"));

    let findings = enumerate_fields(&doc, "iframe(https://ads.example)", &static_options());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].qualifier, Some(FieldQualifier::NotWithinForm));
    assert_eq!(findings[0].field_type, "text");
    assert_eq!(findings[0].location, "iframe(https://ads.example)");
    assert!(findings[0].selector.starts_with("<select"));
}

#[test]
fn test_findings_follow_document_order() {
    let mut doc = Document::new("https://example.com");
    doc.push(None, hidden("input", "orphan-a"));
    let form = doc.push(None, ElementData::new("form"));
    doc.push(Some(form), hidden("input", "bound"));
    doc.push(None, hidden("input", "orphan-b"));

    let names: Vec<_> = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options())
        .into_iter()
        .map(|f| f.name.unwrap_or_default())
        .collect();
    assert_eq!(names, ["orphan-a", "bound", "orphan-b"]);
}

#[test]
fn test_inherited_reason_from_hidden_container() {
    let mut doc = Document::new("https://example.com");
    let form = doc.push(None, ElementData::new("form"));
    let wrapper = doc.push(
        Some(form),
        ElementData::new("div").with_style(RawStyle {
            display: Some("none".into()),
            ..Default::default()
        }),
    );
    doc.push(Some(wrapper), ElementData::new("input").with_attr("name", "phone"));

    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options());
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].reason,
        FindingReason::Inherited {
            code: ReasonCode::DisplayNone
        }
    );
    assert!(findings[0].description.starts_with("inherited from ancestor"));
}

#[test]
fn test_direct_reason_wins_over_inherited() {
    let mut doc = Document::new("https://example.com");
    let wrapper = doc.push(
        None,
        ElementData::new("div").with_style(RawStyle {
            display: Some("none".into()),
            ..Default::default()
        }),
    );
    doc.push(
        Some(wrapper),
        ElementData::new("input").with_style(RawStyle {
            opacity: Some("0".into()),
            ..Default::default()
        }),
    );

    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options());
    assert_eq!(
        findings[0].reason,
        FindingReason::Style {
            code: ReasonCode::ZeroOpacity
        }
    );
}

#[test]
fn test_explicit_hidden_reported_by_default() {
    let mut doc = Document::new("https://example.com");
    let form = doc.push(None, ElementData::new("form"));
    doc.push(
        Some(form),
        ElementData::new("input")
            .with_attr("type", "hidden")
            .with_attr("name", "csrf"),
    );

    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &static_options());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].reason, FindingReason::ExplicitHiddenType);
    assert_eq!(findings[0].field_type, "hidden");
}

#[test]
fn test_explicit_hidden_skipped_even_inside_hidden_container() {
    let mut doc = Document::new("https://example.com");
    let form = doc.push(
        None,
        ElementData::new("form").with_style(RawStyle {
            display: Some("none".into()),
            ..Default::default()
        }),
    );
    doc.push(
        Some(form),
        ElementData::new("input").with_attr("type", "HIDDEN"),
    );

    let options = static_options().with_policy(ExplicitHiddenPolicy::Skip);
    assert!(enumerate_fields(&doc, MAIN_PAGE_LOCATION, &options).is_empty());
}

#[test]
fn test_bounding_box_copied_from_geometry() {
    let rect = BoundingBox::new(-4000.0, 0.0, 150.0, 20.0);
    let mut doc = Document::new("https://example.com");
    doc.push(
        None,
        ElementData::new("input")
            .with_style(RawStyle {
                position: Some("fixed".into()),
                ..Default::default()
            })
            .with_geometry(Geometry {
                offset_width: 150.0,
                offset_height: 20.0,
                rect,
            }),
    );

    let options = EnumerationOptions::new(Strictness::Rendered);
    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &options);
    assert_eq!(
        findings[0].reason,
        FindingReason::Style {
            code: ReasonCode::OffscreenFixed
        }
    );
    assert_eq!(findings[0].bounding_box, Some(rect));
}

#[test]
fn test_selector_max_len_applies() {
    let mut doc = Document::new("https://example.com");
    doc.push(None, hidden("input", &"n".repeat(300)));

    let options = static_options().with_selector_max_len(32);
    let findings = enumerate_fields(&doc, MAIN_PAGE_LOCATION, &options);
    assert_eq!(findings[0].selector.chars().count(), 32);
}

#[test]
fn test_policy_from_report_flag() {
    assert_eq!(ExplicitHiddenPolicy::from_report_flag(true), ExplicitHiddenPolicy::Report);
    assert_eq!(ExplicitHiddenPolicy::from_report_flag(false), ExplicitHiddenPolicy::Skip);
    assert_eq!(ExplicitHiddenPolicy::default(), ExplicitHiddenPolicy::Report);
}
