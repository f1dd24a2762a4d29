use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, needle: &str, yes: bool, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let topic = app.find_topic(needle)?;

    if !yes {
        print!("Delete \"{}\" and its review history? [y/N] ", topic.title);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    app.delete_topic(topic.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "title": topic.title,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\"", topic.title);
        }
    }

    Ok(())
}
