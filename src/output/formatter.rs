//! Output formatters: console, JSON, Markdown and HTML renderings of an analysis

use crate::config::OutputFormat;
use crate::error::{AtsScorerError, Result};
use crate::output::report::AnalysisEnvelope;
use crate::scoring::{Metric, Priority, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisEnvelope) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score bars
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the response envelope
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const BAR_WIDTH: usize = 20;

fn score_bar(score: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        (score as usize * BAR_WIDTH / max as usize).min(BAR_WIDTH)
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "EXCELLENT",
        ScoreBand::Good => "GOOD",
        ScoreBand::NeedsImprovement => "NEEDS IMPROVEMENT",
    }
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Yellow,
        ScoreBand::NeedsImprovement => Color::Red,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let badge = band_label(band);
        if self.use_colors {
            format!("[{}]", badge.color(band_color(band)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> &'static str {
        match (priority, self.use_colors) {
            (Priority::High, true) => "⚠️ ",
            (Priority::Medium, true) => "📋",
            (Priority::Low, true) => "💡",
            (Priority::High, false) => "[*]",
            (Priority::Medium, false) => "[-]",
            (Priority::Low, false) => "[+]",
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let breakdown = &analysis.breakdown;
        let band = ScoreBand::from_score(analysis.overall_score);
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "File: {} ({} bytes) | Received: {}\n",
            report.metadata.filename, report.metadata.file_size, report.metadata.upload_time
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "ATS Compatibility Score: {} {}\n",
            analysis.overall_score,
            self.format_score_badge(band)
        ));
        output.push_str(&format!("{}\n", self.colorize(band.description(), Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (metric, score) in breakdown.scores() {
            let max = metric.max_score();
            let bar = score_bar(score, max);
            let bar = self.colorize(&bar, band_color(ScoreBand::for_metric(score, max)));
            output.push_str(&format!("{:<22} {:>2}/{:<2} {}\n", metric.label(), score, max, bar));
        }

        if !analysis.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Strengths", 2));
            for strength in &analysis.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        output.push_str(&self.format_header("🎯 Recommendations", 2));
        if analysis.recommendations.is_empty() {
            output.push_str("  No recommendations. Every check passed.\n");
        }
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} [{}] {}\n     {}\n",
                i + 1,
                self.format_priority_icon(rec.priority),
                rec.priority,
                self.colorize(&rec.category, Color::Cyan),
                rec.suggestion
            ));
        }

        let info = &analysis.extracted_info;
        output.push_str(&self.format_header("📄 Resume Summary", 2));
        output.push_str(&format!("  • Estimated experience: {}\n", info.estimated_experience));
        output.push_str(&format!("  • Education: {}\n", info.education));
        if info.top_skills.is_empty() {
            output.push_str("  • Top skills: none detected\n");
        } else {
            output.push_str(&format!("  • Top skills: {}\n", info.top_skills.join(", ")));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 2));

            let keywords: Vec<String> = breakdown
                .keyword_matching
                .matched_keywords
                .iter()
                .map(|m| format!("{} ({})", m.keyword, m.category))
                .collect();
            output.push_str(&format!(
                "  • Keywords matched ({}): {}\n",
                breakdown.keyword_matching.total_matched,
                keywords.join(", ")
            ));
            output.push_str(&format!(
                "  • Sections found ({}): {}\n",
                breakdown.structure_analysis.section_count,
                breakdown.structure_analysis.found_sections.join(", ")
            ));

            let metrics = &breakdown.content_quality.metrics;
            output.push_str(&format!(
                "  • Content: {} words, {} sentences, {} action verbs\n",
                metrics.word_count, metrics.sentences, metrics.action_verbs
            ));
            output.push_str(&format!(
                "  • File type: {}\n",
                breakdown.format_compatibility.file_type
            ));

            let contact = &breakdown.contact_information.contact_info;
            output.push_str(&format!(
                "  • Contact: email {}, phone {}, LinkedIn {}, location {}\n",
                yes_no(contact.email),
                yes_no(contact.phone),
                yes_no(contact.linkedin),
                yes_no(contact.location)
            ));
            output.push_str(&format!(
                "  • Quantified achievements: {}\n",
                breakdown.quantification.quantifications
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisEnvelope) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_band_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🟠 Good",
            ScoreBand::NeedsImprovement => "🔴 Needs improvement",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let band = ScoreBand::from_score(analysis.overall_score);
        let mut md = String::new();

        md.push_str("# ATS Compatibility Report\n\n");
        md.push_str(&format!(
            "**Overall score:** {} ({})\n\n> {}\n\n",
            analysis.overall_score,
            Self::markdown_band_badge(band),
            band.description()
        ));

        md.push_str("## Score Breakdown\n\n| Metric | Score | Max |\n|---|---:|---:|\n");
        for (metric, score) in analysis.breakdown.scores() {
            md.push_str(&format!("| {} | {} | {} |\n", metric.label(), score, metric.max_score()));
        }
        md.push('\n');

        md.push_str("## Recommendations\n\n");
        if analysis.recommendations.is_empty() {
            md.push_str("_None. Every check passed._\n");
        }
        for rec in &analysis.recommendations {
            md.push_str(&format!(
                "- **{}** ({} priority): {}\n",
                rec.category, rec.priority, rec.suggestion
            ));
        }
        md.push('\n');

        if !analysis.strengths.is_empty() {
            md.push_str("## Strengths\n\n");
            for strength in &analysis.strengths {
                md.push_str(&format!("- {}\n", strength));
            }
            md.push('\n');
        }

        let info = &analysis.extracted_info;
        md.push_str("## Extracted Information\n\n");
        md.push_str(&format!("- **Estimated experience:** {}\n", info.estimated_experience));
        md.push_str(&format!("- **Education:** {}\n", info.education));
        md.push_str(&format!(
            "- **Top skills:** {}\n",
            if info.top_skills.is_empty() {
                "none detected".to_string()
            } else {
                info.top_skills.join(", ")
            }
        ));

        if self.include_metadata {
            md.push_str(&format!(
                "\n---\n_{} · {} bytes · {}_\n",
                report.metadata.filename, report.metadata.file_size, report.metadata.upload_time
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

struct HtmlMetricRow {
    label: &'static str,
    score: u32,
    max: u32,
    percentage: u32,
    class: &'static str,
}

struct HtmlRecommendation {
    priority: String,
    category: String,
    suggestion: String,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>ATS Compatibility Report: {{ filename }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #2d3748; max-width: 820px; margin: 0 auto; padding: 20px; background: #f7fafc; }
        .container { background: white; padding: 30px; border-radius: 15px; border: 2px solid #e2e8f0; }
        .score { font-size: 2.5rem; font-weight: 700; color: white; width: 120px; height: 120px; border-radius: 50%; display: flex; align-items: center; justify-content: center; margin: 0 auto 20px; }
        .excellent { background: #38a169; }
        .good { background: #dd6b20; }
        .poor { background: #e53e3e; }
        .bar { width: 160px; height: 6px; background: #e2e8f0; border-radius: 3px; display: inline-block; }
        .bar div { height: 100%; border-radius: 3px; }
        .priority-high { border-left: 4px solid #e53e3e; }
        .priority-medium { border-left: 4px solid #dd6b20; }
        .priority-low { border-left: 4px solid #38a169; }
        .rec { padding: 8px 12px; margin: 8px 0; background: #f7fafc; }
        td { padding: 6px 10px; }
    </style>
    {% endif %}
</head>
<body>
<div class="container">
    <div class="score {{ score_class }}">{{ overall_score }}</div>
    <h2 style="text-align:center">ATS Compatibility Score</h2>
    <p style="text-align:center">{{ description }}</p>

    <h3>Score Breakdown</h3>
    <table>
    {% for row in metric_rows %}
        <tr>
            <td>{{ row.label }}</td>
            <td>{{ row.score }}/{{ row.max }}</td>
            <td><span class="bar"><div class="{{ row.class }}" style="width: {{ row.percentage }}%"></div></span></td>
        </tr>
    {% endfor %}
    </table>

    <h3>Recommendations</h3>
    {% if recommendations.is_empty() %}
    <p>No recommendations. Every check passed.</p>
    {% endif %}
    {% for rec in recommendations %}
    <div class="rec priority-{{ rec.priority }}"><strong>{{ rec.category }}</strong>: {{ rec.suggestion }}</div>
    {% endfor %}

    {% if !strengths.is_empty() %}
    <h3>Strengths</h3>
    <ul>
    {% for strength in strengths %}
        <li>{{ strength }}</li>
    {% endfor %}
    </ul>
    {% endif %}

    <h3>Extracted Information</h3>
    <ul>
        <li><strong>Estimated experience:</strong> {{ estimated_experience }}</li>
        <li><strong>Education:</strong> {{ education }}</li>
        <li><strong>Top skills:</strong> {{ top_skills }}</li>
    </ul>
    <p><small>{{ filename }} · {{ file_size }} bytes · {{ upload_time }}</small></p>
</div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    filename: String,
    file_size: u64,
    upload_time: String,
    overall_score: u32,
    score_class: &'static str,
    description: &'static str,
    metric_rows: Vec<HtmlMetricRow>,
    recommendations: Vec<HtmlRecommendation>,
    strengths: Vec<String>,
    estimated_experience: String,
    education: String,
    top_skills: String,
}

fn html_class(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "excellent",
        ScoreBand::Good => "good",
        ScoreBand::NeedsImprovement => "poor",
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisEnvelope) -> HtmlTemplate {
        let analysis = &report.analysis;
        let band = ScoreBand::from_score(analysis.overall_score);

        let metric_rows = Metric::ALL
            .iter()
            .map(|&metric| {
                let score = analysis.breakdown.score(metric);
                let max = metric.max_score();
                HtmlMetricRow {
                    label: metric.label(),
                    score,
                    max,
                    percentage: score * 100 / max,
                    class: html_class(ScoreBand::for_metric(score, max)),
                }
            })
            .collect();

        let recommendations = analysis
            .recommendations
            .iter()
            .map(|rec| HtmlRecommendation {
                priority: rec.priority.to_string(),
                category: rec.category.clone(),
                suggestion: rec.suggestion.clone(),
            })
            .collect();

        let info = &analysis.extracted_info;
        HtmlTemplate {
            include_styles: self.include_styles,
            filename: report.metadata.filename.clone(),
            file_size: report.metadata.file_size,
            upload_time: report.metadata.upload_time.clone(),
            overall_score: analysis.overall_score,
            score_class: html_class(band),
            description: band.description(),
            metric_rows,
            recommendations,
            strengths: analysis.strengths.clone(),
            estimated_experience: info.estimated_experience.clone(),
            education: info.education.clone(),
            top_skills: if info.top_skills.is_empty() {
                "none detected".to_string()
            } else {
                info.top_skills.join(", ")
            },
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisEnvelope) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AtsScorerError::OutputFormatting(format!("HTML rendering failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisEnvelope, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats_report{}.{}", base_name, timestamp_suffix, extension)
}
