//! Report rendering against the fixture assessment.

use std::path::Path;
use tmmi_tracker::model::AssessmentDraft;
use tmmi_tracker::reports::{create_reporter_with_options, ReportContext, ReportMetadata};
use tmmi_tracker::{load_catalog, ProgressionEngine, QuestionCatalog, ReportFormat};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture() -> (QuestionCatalog, AssessmentDraft) {
    let catalog = load_catalog(&Path::new(FIXTURES_DIR).join("questions.json")).unwrap();
    let content =
        std::fs::read_to_string(Path::new(FIXTURES_DIR).join("assessment.json")).unwrap();
    (catalog, serde_json::from_str(&content).unwrap())
}

fn render(format: ReportFormat) -> String {
    let (catalog, draft) = fixture();
    let report = ProgressionEngine::default().score(&catalog, &draft.answers);
    let metadata = ReportMetadata {
        organization: Some(draft.organization.clone()),
        reviewer: Some(draft.reviewer_name.clone()),
        assessed_at: Some(draft.timestamp),
        generated_at: None,
    };
    create_reporter_with_options(format, false)
        .generate(&report, &ReportContext::new(&catalog, &metadata))
        .unwrap()
}

#[test]
fn csv_export_lists_every_catalog_question() {
    insta::assert_snapshot!(render(ReportFormat::Csv), @r###"
    Question ID,Level,Process Area,Question,Priority,Answer,Comments,Evidence URL,Recommended Activity,Reference URL
    L2_TP_001,2,Test Planning,Is a product risk assessment performed?,High,Yes,,https://wiki.example.com/risk,product risk assessment,https://www.tmmi.org/tmmi-model/
    L2_TP_002,2,Test Planning,Is a test approach established?,Medium,Yes,,https://wiki.example.com/approach,a test approach,https://www.tmmi.org/tmmi-model/
    L2_TMC_001,2,Test Monitoring and Control,Is test progress monitored?,High,Partial,"weekly, not daily",,test progress monitoring,https://www.tmmi.org/tmmi-model/
    L2_TMC_002,2,Test Monitoring and Control,"Are corrective actions tracked, reviewed, and closed?",High,No,,,corrective action management,https://www.tmmi.org/tmmi-model/
    L3_TO_001,3,Test Organization,Is there an independent test organization?,High,Not Answered,,,an independent test organization,https://www.tmmi.org/tmmi-model/
    L3_GG_001,3,Institutionalization,Is a defined process tailored per project?,Low,Not Answered,,,,https://www.tmmi.org/tmmi-model/
    "###);
}

#[test]
fn markdown_report_names_blockers_and_gaps() {
    let md = render(ReportFormat::Markdown);

    assert!(md.starts_with("# TMMi Progression Report: Acme Testing"));
    assert!(md.contains("**Reviewer:** Sarah Johnson"));
    assert!(md.contains("**Achieved:** Level 1 (Initial)"));
    assert!(md.contains("- Test Monitoring and Control"));
    assert!(md.contains("### Level 2 (Managed)"));
    assert!(md.contains("Implement corrective action management - Critical for level 2"));
    assert!(md.contains("| L3_TO_001 | Not Answered | - | - |"));
    assert!(md.contains("| Level 2 (Managed) | 4/4 | 2 | 1 | 1 | 62.5% |"));
    assert!(md.contains("| 2 | Test Monitoring and Control | 2/2 | 0 | 1 | 1 | 25.0% |"));
}

#[test]
fn json_report_carries_scores_and_metadata() {
    let json: serde_json::Value = serde_json::from_str(&render(ReportFormat::Json)).unwrap();

    assert_eq!(json["tool"]["name"], "tmmi-tracker");
    assert_eq!(json["metadata"]["organization"], "Acme Testing");
    assert!(json["metadata"]["generated_at"].is_string());
    assert_eq!(json["catalog_questions"], 6);
    assert_eq!(json["achieved_level"], 1);
    assert_eq!(json["readiness"]["status"], "target");
    assert_eq!(json["readiness"]["readiness"], 62.5);
    assert_eq!(json["readiness"]["eligible"], false);
    assert_eq!(json["gaps"].as_array().unwrap().len(), 2);
    assert_eq!(json["level_tallies"][0]["level"], 2);
    assert_eq!(json["level_tallies"][0]["overall_compliance"], 62.5);
    assert_eq!(json["area_tallies"].as_array().unwrap().len(), 4);
}

#[test]
fn summary_without_color_is_plain_text() {
    let summary = render(ReportFormat::Summary);

    assert!(!summary.contains('\x1b'));
    assert!(summary.contains("Achieved: Level 1 (Initial)"));
    assert!(summary.contains("Gaps: 2"));
    assert!(summary.contains("L2   4/4   answered    62.5%  (2 yes, 1 partial, 1 no)"));
}
