use crate::compare::classify::{Category, Classification};
use crate::compare::summary::{DivergenceSummary, ScenarioOutcome, SkipReason};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Generate JUnit XML from a divergence summary.
///
/// Every examined scenario becomes a test case; a divergent question flow
/// is a failure and skipped scenarios are marked skipped.
pub fn generate_junit_xml(summary: &DivergenceSummary, generated_at: &str) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let failures = summary.classified() - summary.same_all.len();
    let tests = summary.classified() + summary.skipped.len();
    let tests = tests.to_string();
    let failures = failures.to_string();
    let skipped = summary.skipped.len().to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "qflow-compare"));
    suites_start.push_attribute(("tests", tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    suites_start.push_attribute(("skipped", skipped.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "question-flow"));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("skipped", skipped.as_str()));
    suite_start.push_attribute(("timestamp", generated_at));
    writer.write_event(Event::Start(suite_start))?;

    for category in Category::ALL {
        for outcome in summary.outcomes(category) {
            write_outcome(&mut writer, outcome)?;
        }
    }

    for skipped in &summary.skipped {
        writer.write_event(Event::Start(test_case(&skipped.name)))?;
        let reason = match skipped.reason {
            SkipReason::Passed => "scenario passed",
            SkipReason::MissingLog => "question log missing for an engine",
        };
        let mut skip = BytesStart::new("skipped");
        skip.push_attribute(("message", reason));
        writer.write_event(Event::Empty(skip))?;
        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result)?)
}

fn test_case(name: &str) -> BytesStart<'_> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", name));
    case_start.push_attribute(("classname", "question-flow"));
    case_start
}

fn write_outcome<W: std::io::Write>(writer: &mut Writer<W>, outcome: &ScenarioOutcome) -> Result<()> {
    writer.write_event(Event::Start(test_case(&outcome.name)))?;

    let message = match &outcome.classification {
        Classification::SameAll => None,
        Classification::DiffCount { c_count, a_count } => Some(format!(
            "question count differs: c-diagnosis={}, askman={}",
            c_count, a_count
        )),
        Classification::DiffQuestion {
            q_num,
            c_text,
            a_text,
        } => Some(format!(
            "Q{} different question: c-diagnosis={}, askman={}",
            q_num, c_text, a_text
        )),
        Classification::DiffAnswer {
            q_num,
            question,
            c_ans,
            a_ans,
        } => Some(format!(
            "Q{} different answer to {}: c-diagnosis={}, askman={}",
            q_num, question, c_ans, a_ans
        )),
    };

    if let Some(message) = message {
        let mut fail_start = BytesStart::new("failure");
        fail_start.push_attribute(("message", message.as_str()));
        fail_start.push_attribute(("type", outcome.classification.category().as_str()));
        writer.write_event(Event::Start(fail_start))?;
        writer.write_event(Event::Text(BytesText::new(&message)))?;
        writer.write_event(Event::End(BytesEnd::new("failure")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}
