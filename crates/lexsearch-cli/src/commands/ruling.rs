//! Ruling management commands

use crate::app::{OutputFormat, RulingAction, RulingArgs};
use crate::output;
use anyhow::Result;
use lexsearch_core::{Database, NewRuling};

pub async fn run(args: RulingArgs, db: &Database, format: OutputFormat) -> Result<()> {
    match args.action {
        RulingAction::Add {
            caption,
            date,
            court,
            docket,
            subject_matter,
            process_type,
            judge,
            text_file,
            url,
        } => {
            let full_text = match text_file {
                Some(path) => Some(std::fs::read_to_string(&path)?),
                None => None,
            };

            let id = db.insert_ruling(&NewRuling {
                caption,
                decision_date: date.map(|d| d.to_string()),
                court,
                docket,
                subject_matter,
                process_type,
                judge,
                full_text,
                source_url: url,
                ..Default::default()
            })?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "id": id }));
            } else {
                println!("Added ruling #{id}");
            }
        }
        RulingAction::Show { id } => {
            let ruling = db.get_ruling(id)?;
            let tags = db.tags_for_ruling(id)?;
            output::print_ruling_detail(&ruling, &tags, format)?;
        }
        RulingAction::List {
            limit,
            offset,
            subject_matter,
        } => {
            let rulings = db.list_rulings(limit, offset, subject_matter.as_deref())?;
            output::print_ruling_list(&rulings, format)?;
        }
        RulingAction::Remove { id } => {
            db.delete_ruling(id)?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "removed": id }));
            } else {
                println!("Removed ruling #{id}");
            }
        }
    }
    Ok(())
}
