use crate::compare::classify::{Category, Classification};
use crate::compare::detail::{DetailOutcome, QuestionSide, ScenarioDetail};
use crate::compare::failures::FailureAnalysis;
use crate::compare::summary::DivergenceSummary;
use crate::parser::types::DiseaseResult;
use crate::utils::text::preview;
use crate::utils::Config;
use colored::Colorize;
use std::fmt::{self, Write};

const WIDE_RULE: usize = 100;
const RULE: usize = 80;

fn category_heading(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::DiffCount => ("1️⃣", "質問数が異なる (question count differs)"),
        Category::DiffAnswer => ("2️⃣", "同じ質問だが回答が異なる (same question, different answer)"),
        Category::DiffQuestion => ("3️⃣", "異なる質問が出現 (different question asked)"),
        Category::SameAll => ("4️⃣", "全ての質問と回答が一致 (all questions and answers match)"),
    }
}

/// Console summary of a batch run: counts per category plus a few examples
pub fn render_summary(summary: &DivergenceSummary, config: &Config) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let scope = match config.scenario_limit {
        Some(n) => format!("最初の{}シナリオ (first {} scenarios)", n, n),
        None => format!("全{}シナリオ (all {} scenarios)", summary.total, summary.total),
    };

    writeln!(
        out,
        "\n{} 質問フロー違い分析 (question flow divergence analysis)\n",
        "📊".blue()
    )?;
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(out, "\n📋 分析結果 ({})", scope.bold())?;

    for category in Category::ALL {
        let outcomes = summary.outcomes(category);
        let (marker, title) = category_heading(category);
        writeln!(
            out,
            "\n{} {}: {}件",
            marker,
            title,
            outcomes.len().to_string().yellow()
        )?;

        for outcome in outcomes.iter().take(config.examples_per_category) {
            render_outcome(&mut out, &outcome.name, &outcome.classification, config)?;
        }
    }

    if !summary.skipped.is_empty() {
        writeln!(
            out,
            "\n{} 対象外 (skipped): {}件",
            "ℹ".blue(),
            summary.skipped.len()
        )?;
    }

    writeln!(out, "\n{}\n", "=".repeat(WIDE_RULE))?;
    Ok(out)
}

fn render_outcome(
    out: &mut String,
    name: &str,
    classification: &Classification,
    config: &Config,
) -> fmt::Result {
    match classification {
        Classification::DiffCount { c_count, a_count } => {
            writeln!(
                out,
                "   - {}: c-diagnosis={}問, askman={}問",
                name, c_count, a_count
            )?;
        }
        Classification::DiffAnswer {
            q_num,
            question,
            c_ans,
            a_ans,
        } => {
            writeln!(out, "   - {}: Q{}", name, q_num)?;
            writeln!(
                out,
                "     質問: {}...",
                preview(question, config.question_preview_chars)
            )?;
            writeln!(out, "     c-diagnosis→「{}」, askman→「{}」", c_ans, a_ans)?;
        }
        Classification::DiffQuestion {
            q_num,
            c_text,
            a_text,
        } => {
            writeln!(out, "   - {}: Q{}", name, q_num)?;
            writeln!(
                out,
                "     c-diagnosis: {}...",
                preview(c_text, config.text_preview_chars)
            )?;
            writeln!(
                out,
                "     askman: {}...",
                preview(a_text, config.text_preview_chars)
            )?;
        }
        Classification::SameAll => {
            writeln!(out, "   - {}", name)?;
        }
    }
    Ok(())
}

/// Console detail for a single scenario
pub fn render_detail(detail: &ScenarioDetail) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "\n{} {} - 質問フロー比較 (question flow comparison)\n",
        "🔍".blue(),
        detail.name.bold()
    )?;
    writeln!(
        out,
        "質問数 (questions): c-diagnosis={}問, askman={}問\n",
        detail.c_count, detail.a_count
    )?;
    writeln!(out, "{}\n", "=".repeat(RULE))?;

    match &detail.outcome {
        DetailOutcome::Diverged {
            q_num,
            same_question,
            c_diagnosis,
            askman,
        } => {
            writeln!(
                out,
                "{} Q{} - 最初の違いを発見! (first divergence found)\n",
                "❗️".red(),
                q_num
            )?;
            render_side(&mut out, "c-diagnosis", c_diagnosis)?;
            render_side(&mut out, "askman", askman)?;

            if *same_question {
                writeln!(
                    out,
                    "→ 同じ質問だが回答が異なる (ランダム選択が異なった) / same question, different answer\n"
                )?;
            } else {
                writeln!(
                    out,
                    "→ 異なる質問が出ている (エンジンの違い) / different question asked\n"
                )?;
            }
        }
        DetailOutcome::CountOnly { c_count, a_count } => {
            let overlap = c_count.min(a_count);
            writeln!(
                out,
                "{} 先頭{}問は一致、質問数のみ異なる (first {} match, counts differ): c-diagnosis={}問, askman={}問\n",
                "⚠️".yellow(),
                overlap,
                overlap,
                c_count,
                a_count
            )?;
        }
        DetailOutcome::Identical { count } => {
            writeln!(
                out,
                "{} 全{}問の質問文と回答が完全一致 (all {} questions and answers match)\n",
                "✅".green(),
                count,
                count
            )?;
            writeln!(
                out,
                "しかし疾患結果が異なる場合、以下の可能性があります (if diagnoses still differ):"
            )?;
            writeln!(
                out,
                "  1. 結果計算ロジックの違い (different result computation)"
            )?;
            writeln!(
                out,
                "  2. 同じ質問・回答でも内部的な処理が異なる (different internal processing)\n"
            )?;
        }
    }

    if detail.has_disease_mismatch() {
        writeln!(out, "疾患の違い (disease differences):")?;
        render_diseases(&mut out, "c-diagnosisのみ (only c-diagnosis)", &detail.c_diagnosis_only)?;
        render_diseases(&mut out, "askmanのみ (only askman)", &detail.askman_only)?;
        writeln!(out)?;
    }

    Ok(out)
}

fn render_side(out: &mut String, engine: &str, side: &QuestionSide) -> fmt::Result {
    writeln!(out, "[{}]", engine.cyan())?;
    writeln!(out, "  質問ID: {}", side.question_id)?;
    writeln!(out, "  質問文: {}", side.question_text)?;
    writeln!(out, "  回答: {}\n", side.selected_option)
}

fn render_diseases(out: &mut String, title: &str, diseases: &[DiseaseResult]) -> fmt::Result {
    if diseases.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = diseases.iter().map(|d| d.name.as_str()).collect();
    writeln!(out, "  {}: {}", title, names.join(", "))
}

/// Console report of failure patterns
pub fn render_failures(analysis: &FailureAnalysis) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "\n{} テスト失敗パターン分析 (failure pattern analysis): {}シナリオ\n",
        "📊".blue(),
        analysis.failed_scenarios
    )?;
    writeln!(out, "{}", "=".repeat(RULE))?;

    for pattern in &analysis.patterns {
        writeln!(out, "\n🔍 {}", pattern.kind.label().bold())?;
        writeln!(out, "   件数: {}件", pattern.count)?;
        writeln!(out, "   例:")?;
        for example in &pattern.examples {
            writeln!(out, "     - {}", example)?;
        }
    }

    writeln!(out, "\n{}", "=".repeat(RULE))?;
    writeln!(
        out,
        "\n合計失敗パターン (patterns): {}種類",
        analysis.patterns.len()
    )?;
    writeln!(out, "合計問題箇所 (issues): {}件\n", analysis.total_issues())?;
    Ok(out)
}
