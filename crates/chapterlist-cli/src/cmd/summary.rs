use super::Project;
use crate::output::print_json;
use anyhow::Context;
use chapterlist_core::{paths, summary};
use std::path::Path;

pub fn run(project: &Project, output: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let chapters = project.chapters()?;
    let path = match output {
        Some(p) => paths::resolve(&project.root, p),
        None => paths::summary_path(&project.chapters_dir),
    };
    let introduction = summary::introduction_title(&project.chapters_dir)
        .context("failed to read introduction")?;
    let changed = summary::write_summary(&path, &chapters, introduction.as_deref())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "changed": changed,
            "chapters": chapters.len(),
        }))?;
    } else if changed {
        println!("Wrote {} ({} chapters).", project.display_path(&path), chapters.len());
    } else {
        println!("{} is already up to date.", project.display_path(&path));
    }
    Ok(())
}
