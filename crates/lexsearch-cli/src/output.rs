//! Terminal and JSON output formatting

use crate::app::OutputFormat;
use anyhow::Result;
use lexsearch_core::{Ruling, RulingAnalysis, SearchResult, Tag};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_search_results(results: &[SearchResult], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for result in results {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(stdout, "#{} {}", result.id, result.caption)?;
        stdout.reset()?;
        writeln!(stdout, "  ({:.3})", result.similarity)?;

        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
        let meta: Vec<&str> = [
            result.decision_date.as_deref(),
            result.court.as_deref(),
            result.subject_matter.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !meta.is_empty() {
            writeln!(stdout, "  {}", meta.join(" | "))?;
        }
        stdout.reset()?;

        if let Some(ref summary) = result.summary {
            writeln!(stdout, "  {}", summary)?;
        }
        writeln!(stdout)?;
    }
    Ok(())
}

pub fn print_ruling_list(rulings: &[Ruling], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&rulings);
    }

    for ruling in rulings {
        let matter = ruling.subject_matter.as_deref().unwrap_or("-");
        let date = ruling.decision_date.as_deref().unwrap_or("-");
        println!("#{}  {}  [{}]  {}", ruling.id, date, matter, ruling.caption);
    }
    println!("{} ruling(s)", rulings.len());
    Ok(())
}

pub fn print_ruling_detail(
    ruling: &Ruling,
    tags: &[(Tag, Option<f64>)],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        #[derive(serde::Serialize)]
        struct Detail<'a> {
            #[serde(flatten)]
            ruling: &'a Ruling,
            tags: Vec<TagWithConfidence<'a>>,
        }
        #[derive(serde::Serialize)]
        struct TagWithConfidence<'a> {
            #[serde(flatten)]
            tag: &'a Tag,
            confidence: Option<f64>,
        }
        return print_json(&Detail {
            ruling,
            tags: tags
                .iter()
                .map(|(tag, confidence)| TagWithConfidence {
                    tag,
                    confidence: *confidence,
                })
                .collect(),
        });
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "#{} {}", ruling.id, ruling.caption)?;
    stdout.reset()?;

    let fields = [
        ("Date", ruling.decision_date.as_deref()),
        ("Court", ruling.court.as_deref()),
        ("Docket", ruling.docket.as_deref()),
        ("Subject matter", ruling.subject_matter.as_deref()),
        ("Process type", ruling.process_type.as_deref()),
        ("Judge", ruling.judge.as_deref()),
        ("Outcome", ruling.outcome.as_deref()),
        ("Source", ruling.source_url.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }

    if let Some(ref summary) = ruling.summary {
        println!("\n  {summary}");
    }

    if !tags.is_empty() {
        let names: Vec<String> = tags
            .iter()
            .map(|(tag, confidence)| match confidence {
                Some(c) => format!("{} ({c:.1})", tag.name),
                None => tag.name.clone(),
            })
            .collect();
        println!("\n  Tags: {}", names.join(", "));
    }
    Ok(())
}

pub fn print_tags(tags: &[Tag], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&tags);
    }

    for tag in tags {
        let kind = if tag.generated { "generated" } else { "official" };
        match tag.category {
            Some(ref category) => println!("{}  [{}] ({})", tag.name, category, kind),
            None => println!("{}  ({})", tag.name, kind),
        }
    }
    println!("{} tag(s)", tags.len());
    Ok(())
}

pub fn print_analysis(analysis: &RulingAnalysis, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&analysis);
    }

    println!("Subject matter: {}", analysis.subject_matter);
    println!("Process type:   {}", analysis.process_type);
    println!("Outcome:        {}", analysis.outcome);
    println!(
        "Parties:        {} c/ {}",
        analysis.parties.claimant, analysis.parties.respondent
    );
    println!("\n{}", analysis.summary);

    if !analysis.tags.is_empty() {
        let names: Vec<&str> = analysis.tags.iter().map(|t| t.name.as_str()).collect();
        println!("\nTags: {}", names.join(", "));
    }
    if !analysis.cited_norms.is_empty() {
        println!("Cited norms: {}", analysis.cited_norms.join("; "));
    }
    Ok(())
}
