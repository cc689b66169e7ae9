use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use jsonzod_codegen::Project;
use jsonzod_codegen_zod::{ProjectFiles, generate_project, write_files};
use jsonzod_core::WriteResult;
use jsonzod_schema::Manifest;
use tracing::debug;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct BuildCommand {
    /// Path to jz.toml (defaults to ./jz.toml)
    #[arg(short, long, default_value = "jz.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let base = self.config.parent().unwrap_or(Path::new("."));
        debug!(documents = manifest.documents.len(), config = %self.config.display(), "loaded manifest");
        let mut project = Project::from_manifest(&manifest, base).unwrap_or_exit();
        let generated = generate_project(&mut project).unwrap_or_exit();

        for cycle in &generated.output.cycles {
            eprintln!("note: reference cycle between {} uses z.lazy", cycle.join(", "));
        }

        if self.dry_run {
            Self::run_preview(&generated);
            return Ok(());
        }

        let results = write_files(&generated.files, &self.output)
            .wrap_err("Failed to write generated modules")?;
        let written = results
            .iter()
            .filter(|(_, result)| *result == WriteResult::Written)
            .count();
        for (path, result) in &results {
            let status = match result {
                WriteResult::Written => "wrote",
                WriteResult::Unchanged => "unchanged",
            };
            println!("  {:<9} {}", status, self.output.join(path).display());
        }
        println!(
            "{} modules, {} written, {} unchanged",
            results.len(),
            written,
            results.len() - written
        );
        Ok(())
    }

    fn run_preview(generated: &ProjectFiles) {
        for file in &generated.files {
            println!("── {} ──", file.path().display());
            println!("{}", file.content());
        }

        println!("── Summary ──");
        println!("{} files would be generated", generated.files.len());
    }
}
