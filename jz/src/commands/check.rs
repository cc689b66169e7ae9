use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use jsonzod_codegen::Project;
use jsonzod_schema::Manifest;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to jz.toml (defaults to ./jz.toml)
    #[arg(short, long, default_value = "jz.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let base = self.config.parent().unwrap_or(Path::new("."));
        let mut project = Project::from_manifest(&manifest, base).unwrap_or_exit();
        let output = project.compile().unwrap_or_exit();

        let exports: usize = output.documents.iter().map(|d| d.exports.len()).sum();
        println!(
            "{} documents, {} exports, {} references",
            output.documents.len(),
            exports,
            output.edges.len()
        );

        if output.cycles.is_empty() {
            println!("no reference cycles");
        } else {
            println!("Cycles ({}), broken by {} lazy references:", output.cycles.len(), output.deferred_edges());
            for cycle in &output.cycles {
                println!("  {}", cycle.join(" <-> "));
            }
        }
        Ok(())
    }
}
