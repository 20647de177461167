//! Upload a series: select, verify, confirm, publish, cross-link, report.
//!
//! Every check before publishing is terminal: a missing series, an unusable
//! token, or anything but an explicit `y` at the confirmation stops the run
//! before the companion tool is touched.

use std::io::BufRead;
use std::process::ExitCode;

use color_eyre::eyre::{Context, Result};
use color_print::cprintln;
use indoc::formatdoc;
use upload_tool::{
    layout::Layout,
    prompt::{Confirmation, Prompter},
    runner::Runner,
    series::{self, SeriesEntry},
    summary::{UploadSummary, parse_summary},
    token::{self, TOKEN_SETTINGS_URL},
};

use super::ProjectArgs;

/// Tags applied by the companion tool to every article.
const DEFAULT_TAGS: &str = "Next.js, React, JavaScript, TypeScript, プログラミング";

#[tracing::instrument]
pub fn main(project: ProjectArgs, series: Option<String>) -> Result<ExitCode> {
    let layout = project.layout();
    let runner = project.runner(&layout);
    let mut prompter = Prompter::stdin();

    println!("🚀 Qiita Series Upload Tool");
    println!("⚠️  PUBLISHING TOOL - Articles will be made public on Qiita");
    println!("{}", "=".repeat(50));

    let catalog = series::catalog(&layout.articles_dir()).context("discover series")?;
    if catalog.is_empty() {
        return Ok(fail("No series found in articles directory."));
    }

    let Some(selected) = select(&catalog, series.as_deref(), &mut prompter)? else {
        return Ok(ExitCode::FAILURE);
    };
    tracing::debug!(?selected, "upload.series.selected");

    let status = token::verify_token(layout.token_file());
    println!("\n{}", status.message(layout.token_file()));
    if !status.is_ok() {
        println!("\n⚠️  Please configure your Qiita API token before proceeding.");
        println!("See: {TOKEN_SETTINGS_URL}");
        return Ok(ExitCode::FAILURE);
    }

    let name = selected.name.as_str();
    println!("\n🏷️  Using default tags ({DEFAULT_TAGS})");
    println!("\n📝 Preparing {name} articles (images will be removed for text-only format)...");
    cprintln!(
        "<yellow>{}</yellow>",
        formatdoc! {"

            ⚠️  This will upload all articles to Qiita.
            ⚠️  If any article fails, ALL uploaded articles will be deleted (rollback)."}
    );

    match prompter.confirm()? {
        Confirmation::Accepted => {}
        Confirmation::Declined => {
            cprintln!("<red>❌ Upload cancelled</red>");
            return Ok(ExitCode::SUCCESS);
        }
        Confirmation::NoInput => {
            cprintln!(
                "<red>❌ No input available for confirmation. Publishing cancelled for safety.</red>"
            );
            return Ok(ExitCode::SUCCESS);
        }
    }

    if !layout.dependencies_dir().is_dir() {
        println!("\n📦 Installing dependencies...");
        if let Err(error) = runner.install() {
            tracing::debug!(?error, "upload.install.failed");
            return Ok(fail(format!("Failed to install dependencies: {error:#}")));
        }
        cprintln!("<green>✅ Dependencies installed successfully</green>");
    }

    println!("\n📤 Uploading {name} articles to Qiita...");
    println!("{}", "-".repeat(50));
    let upload = match runner.run("upload", name) {
        Ok(upload) if upload.success => upload,
        Ok(upload) => return Ok(fail(format!("Upload failed: {}", upload.output))),
        Err(error) => return Ok(fail(format!("Upload failed: {error:#}"))),
    };

    let summary = parse_summary(&upload.output);
    tracing::debug!(?summary, "upload.summary");
    if summary.successful == 0 {
        return Ok(fail("No articles were uploaded successfully."));
    }

    println!("\n📊 Upload Complete!");
    println!("✅ Successful: {}", summary.successful);
    println!("❌ Failed: {}", summary.failed);

    if summary.successful > 1 {
        link_series(&runner, name);
    }

    report(name, &summary);
    Ok(ExitCode::SUCCESS)
}

/// Resolve the series to upload from the argument or the interactive menu.
///
/// Returns `None` after telling the user why nothing was selected.
fn select<'a, R: BufRead>(
    catalog: &'a [SeriesEntry],
    requested: Option<&str>,
    prompter: &mut Prompter<R>,
) -> Result<Option<&'a SeriesEntry>> {
    match requested {
        Some(requested) => match catalog.iter().find(|entry| entry.name == requested) {
            Some(entry) => {
                println!("\n📚 Direct mode: {entry}");
                Ok(Some(entry))
            }
            None => {
                cprintln!("<red>\n❌ Series '{}' not found.</red>", requested);
                println!("\n📚 Available series:");
                for entry in catalog {
                    println!("  - {}", entry.name);
                }
                Ok(None)
            }
        },
        None => match prompter.select_series(catalog)? {
            Some(index) => {
                let entry = &catalog[index];
                cprintln!("<green>\n✅ Selected: {}</green>", entry);
                Ok(Some(entry))
            }
            None => {
                cprintln!("<red>❌ Invalid selection</red>");
                Ok(None)
            }
        },
    }
}

/// Add navigation links between the articles of the series.
///
/// The articles are already public at this point, so a failure only earns
/// the user a command to retry with.
fn link_series(runner: &Runner, series: &str) {
    println!("\n🔗 Adding series navigation links...");
    println!("{}", "-".repeat(50));

    match runner.run("update-links", series) {
        Ok(links) if links.success => {
            cprintln!("<green>\n✅ Series links added successfully!</green>");
        }
        result => {
            tracing::debug!(?result, "upload.links.failed");
            cprintln!("<yellow>\n⚠️  Failed to add series links. You can retry with:</yellow>");
            println!(
                "   cd {} && {} run update-links {series}",
                upload_tool::layout::COMPANION_DIR,
                runner.name()
            );
        }
    }
}

fn report(series: &str, summary: &UploadSummary) {
    println!("\n{}", "=".repeat(50));
    cprintln!("<green><bold>🎉 Upload Complete!</bold></green>");
    println!("{}", "=".repeat(50));

    if !summary.urls.is_empty() {
        println!("\n📝 Uploaded Articles:");
        for (number, url) in summary.urls.iter().enumerate() {
            println!("{}. {url}", number + 1);
        }
    }

    println!(
        "\n📁 Series data saved to: {}",
        Layout::series_data_file(series)
    );
    println!("📋 Logs available in: {}", Layout::companion_logs_dir());
    println!("\n✨ Done!");
}

fn fail(message: impl AsRef<str>) -> ExitCode {
    cprintln!("<red>\n❌ {}</red>", message.as_ref());
    ExitCode::FAILURE
}
