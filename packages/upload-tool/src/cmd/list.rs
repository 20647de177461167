//! List the series available for upload.

use std::process::ExitCode;

use color_eyre::eyre::{Context, Result};
use color_print::cprintln;
use upload_tool::series;

use super::ProjectArgs;

pub fn main(project: ProjectArgs) -> Result<ExitCode> {
    let layout = project.layout();
    let catalog = series::catalog(&layout.articles_dir()).context("discover series")?;
    if catalog.is_empty() {
        cprintln!("<red>❌ No series found in articles directory.</red>");
        return Ok(ExitCode::FAILURE);
    }

    cprintln!("<bold>📚 Available series:</bold>");
    for entry in catalog {
        println!("  - {entry}");
    }

    Ok(ExitCode::SUCCESS)
}
