use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use jsonzod_codegen_zod::Generator;
use jsonzod_core::{Dialect, Options, OutputFile, WrapMode, WriteResult};
use tracing::debug;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CompileCommand {
    /// Schema document (JSON)
    pub schema: PathBuf,

    /// Target Zod major version
    #[arg(long, default_value_t = Dialect::V4)]
    pub dialect: Dialect,

    /// Output wrapping: none, cjs, esm or const
    #[arg(long, default_value_t = WrapMode::Esm)]
    pub wrap: WrapMode,

    /// Name of the exported validator
    #[arg(long)]
    pub name: Option<String>,

    /// Emit `export type <ALIAS> = z.infer<typeof name>` (requires --name)
    #[arg(long, value_name = "ALIAS")]
    pub type_alias: Option<String>,

    /// Leave out the zod import
    #[arg(long)]
    pub no_import: bool,

    /// Ignore `default` keywords
    #[arg(long)]
    pub no_defaults: bool,

    /// Emit descriptions as JSDoc comments on object members
    #[arg(long)]
    pub jsdocs: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    pub fn run(&self) -> Result<()> {
        let node = jsonzod_schema::parse_file(&self.schema).unwrap_or_exit();
        debug!(schema = %self.schema.display(), dialect = %self.dialect, wrap = %self.wrap, "compiling");
        let text = Generator::new(self.options()).generate(&node).unwrap_or_exit();

        match &self.output {
            None => print!("{}", text),
            Some(path) => {
                let result = OutputFile::new(path, text)
                    .write(Path::new("."))
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                match result {
                    WriteResult::Written => eprintln!("wrote {}", path.display()),
                    WriteResult::Unchanged => eprintln!("{} is up to date", path.display()),
                }
            }
        }
        Ok(())
    }

    fn options(&self) -> Options {
        let mut options = Options::new().dialect(self.dialect).wrap(self.wrap);
        if let Some(name) = &self.name {
            options = options.name(name);
        }
        if let Some(alias) = &self.type_alias {
            options = options.type_alias(alias);
        }
        if self.no_import {
            options = options.without_import();
        }
        if self.no_defaults {
            options = options.without_defaults();
        }
        if self.jsdocs {
            options = options.with_jsdocs();
        }
        options
    }
}
