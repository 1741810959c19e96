//! Tag listing commands

use crate::app::{OutputFormat, TagsAction, TagsArgs};
use crate::output;
use anyhow::Result;
use lexsearch_core::Database;

pub async fn run(args: TagsArgs, db: &Database, format: OutputFormat) -> Result<()> {
    match args.action {
        TagsAction::List { category } => {
            let tags = db.list_tags(category.as_deref())?;
            output::print_tags(&tags, format)?;
        }
        TagsAction::Categories => {
            let categories = db.list_tag_categories()?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in &categories {
                    println!("{category}");
                }
                println!("{} categor(ies)", categories.len());
            }
        }
    }
    Ok(())
}
