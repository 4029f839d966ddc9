use super::Project;
use crate::output::{print_json, print_table};

pub fn run(project: &Project, json: bool) -> anyhow::Result<()> {
    let chapters = project.chapters()?;
    if json {
        return print_json(&chapters);
    }
    let rows = chapters
        .iter()
        .map(|ch| vec![ch.number.to_string(), ch.title.clone(), ch.filename.clone()])
        .collect();
    print_table(&["#", "TITLE", "FILE"], rows);
    Ok(())
}
