use anyhow::Result;

use crate::project::ProjectManager;

pub fn run(pm: &ProjectManager) -> Result<String> {
    let projects = pm.list()?;
    if projects.is_empty() {
        return Ok(format!(
            "No projects in {}. Use 'transcript-analyzer create <name>' to add one.\n",
            pm.root().display()
        ));
    }

    let mut output = String::new();
    for p in &projects {
        let status = if p.transcripts == 0 {
            "empty"
        } else if p.analysed >= p.transcripts {
            "analysed"
        } else {
            "pending"
        };
        output.push_str(&format!(
            "{}  [{status}] {} transcript(s), {} analysed\n",
            p.name, p.transcripts, p.analysed
        ));
        if let Some(desc) = &p.description {
            output.push_str(&format!("  {desc}\n"));
        }
    }
    Ok(output)
}
