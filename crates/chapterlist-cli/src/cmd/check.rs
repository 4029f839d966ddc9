use super::Project;
use crate::output::print_json;
use anyhow::{bail, Context};
use chapterlist_core::patch::is_up_to_date;

pub fn run(project: &Project, json: bool) -> anyhow::Result<()> {
    let chapters = project.chapters()?;
    let up_to_date = is_up_to_date(&project.document, &chapters, &project.patch_options())
        .with_context(|| format!("failed to check {}", project.document.display()))?;

    if json {
        print_json(&serde_json::json!({
            "document": project.document.display().to_string(),
            "up_to_date": up_to_date,
            "chapters": chapters.len(),
        }))?;
    }

    if !up_to_date {
        bail!(
            "{} is out of date: run 'chapterlist update'",
            project.display_path(&project.document)
        );
    }
    if !json {
        println!(
            "{} is up to date ({} chapters).",
            project.display_path(&project.document),
            chapters.len()
        );
    }
    Ok(())
}
