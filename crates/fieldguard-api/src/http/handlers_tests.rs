use super::*;

use fieldguard_protocols::{FindingReason, ReasonCode, RiskAssessment};

#[test]
fn test_scan_request_body_deserialize() {
    let json = r#"{"url": "https://shop.example/", "level": "medium", "reportExplicitHidden": false}"#;
    let body: ScanRequestBody = serde_json::from_str(json).unwrap();
    assert_eq!(body.url, "https://shop.example/");
    assert_eq!(body.level, "medium");
    assert_eq!(body.report_explicit_hidden, Some(false));
}

#[test]
fn test_into_request_applies_policy_override() {
    let body = ScanRequestBody {
        url: "https://shop.example/".to_string(),
        level: "simple".to_string(),
        report_explicit_hidden: Some(false),
    };
    let request = body.into_request().unwrap();
    assert_eq!(request.level, ScanLevel::Simple);
    assert_eq!(request.policy, Some(ExplicitHiddenPolicy::Skip));

    let body = ScanRequestBody {
        url: "https://shop.example/".to_string(),
        level: "advanced".to_string(),
        report_explicit_hidden: None,
    };
    assert_eq!(body.into_request().unwrap().policy, None);
}

#[test]
fn test_into_request_rejects_bad_input() {
    let body = ScanRequestBody {
        url: "ftp://shop.example/".to_string(),
        level: "simple".to_string(),
        report_explicit_hidden: None,
    };
    assert!(matches!(body.into_request(), Err(ApiError::Validation(_))));

    let body = ScanRequestBody {
        url: "https://shop.example/".to_string(),
        level: "paranoid".to_string(),
        report_explicit_hidden: None,
    };
    assert!(matches!(body.into_request(), Err(ApiError::Validation(msg)) if msg.contains("paranoid")));
}

#[test]
fn test_scan_response_wire_shape() {
    let report = ScanReport {
        scan_id: Uuid::nil(),
        url: "https://shop.example/".to_string(),
        level: ScanLevel::Medium,
        scanned_at: Utc::now(),
        findings: vec![FieldFinding {
            name: Some("cc".to_string()),
            field_type: "text".to_string(),
            reason: FindingReason::Style {
                code: ReasonCode::DisplayNone,
            },
            description: ReasonCode::DisplayNone.describe().to_string(),
            location: "main page".to_string(),
            selector: "form[action=\"/pay\"] input[name=\"cc\"]".to_string(),
            bounding_box: None,
            qualifier: None,
        }],
        risk: RiskAssessment {
            level: RiskLevel::Low,
            recommendations: vec!["Review hidden fields for malicious autofill use".to_string()],
        },
        frames_scanned: 2,
        frames_failed: 1,
        degraded: false,
    };

    let value = serde_json::to_value(ScanResponse::from(report)).unwrap();
    assert_eq!(value["scanLevel"], "medium");
    assert_eq!(value["hiddenFields"][0]["name"], "cc");
    assert_eq!(value["hiddenFields"][0]["location"], "main page");
    assert_eq!(value["metadata"]["riskLevel"], "low");
    assert_eq!(value["metadata"]["framesScanned"], 2);
    assert_eq!(value["metadata"]["framesFailed"], 1);
    assert_eq!(value["metadata"]["degraded"], false);
    assert!(value.get("scanId").is_some());
    assert!(value.get("scannedAt").is_some());
}
