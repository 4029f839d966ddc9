use super::{print_chapters, Project};
use crate::output::print_json;
use anyhow::Context;
use chapterlist_core::patch;

pub fn run(project: &Project, json: bool) -> anyhow::Result<()> {
    let chapters = project.chapters()?;
    if !json {
        print_chapters(&chapters);
        println!();
    }

    let report = patch(&project.document, &chapters, &project.patch_options())
        .with_context(|| format!("failed to update {}", project.document.display()))?;

    if json {
        #[derive(serde::Serialize)]
        struct UpdateOutput<'a> {
            document: String,
            changed: bool,
            chapters: &'a [chapterlist_core::ChapterRecord],
        }
        print_json(&UpdateOutput {
            document: project.document.display().to_string(),
            changed: report.changed,
            chapters: &chapters,
        })?;
    } else if report.changed {
        println!(
            "Updated {} ({} chapters).",
            project.display_path(&project.document),
            report.chapters
        );
    } else {
        println!(
            "{} is already up to date.",
            project.display_path(&project.document)
        );
    }
    Ok(())
}
