use anyhow::Result;

use crate::project::ProjectManager;

pub fn run(pm: &ProjectManager, name: &str, description: Option<&str>) -> Result<String> {
    let dir = pm.create(name, description)?;
    Ok(format!(
        "created: {name}\n  path: {}\n  add transcripts (*.txt) to {}\n",
        dir.display(),
        dir.join(crate::project::TRANSCRIPTS_DIR).display()
    ))
}
