//! atrium grants command

use clap::{Args, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

use registry::{GrantTable, MergeReport, PermissionEvaluator};
use shared::PermissionCatalog;

#[derive(Debug, Args)]
pub struct GrantsCommand {
    #[command(subcommand)]
    pub command: GrantsSubcommand,

    /// Catalog definition file (YAML or JSON); built-in catalog when omitted
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Grant table file to seed from and write back to
    #[arg(long, global = true)]
    pub grants: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum GrantsSubcommand {
    /// Show grant coverage per category and overall
    Stats {
        /// Role to evaluate
        #[arg(short, long)]
        role: String,
    },
    /// Flip one action grant for a role
    Toggle {
        /// Module id
        module: String,
        /// Action id
        action: String,
        /// Role to toggle
        #[arg(short, long)]
        role: String,
    },
    /// Grant or revoke every action of a module
    Module {
        /// Module id
        module: String,
        /// Role to toggle
        #[arg(short, long)]
        role: String,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },
    /// Export the grant table as a timestamped snapshot
    Export {
        /// Role whose evaluator to export from
        #[arg(short, long)]
        role: String,
    },
    /// Merge a grant table file into the catalog's table
    Import {
        /// Grant table JSON file
        file: PathBuf,
        /// Role to evaluate under
        #[arg(short, long)]
        role: String,
    },
    /// Search catalog modules by name or action
    Find {
        /// Search text
        query: String,
    },
}

impl GrantsCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(self.catalog.as_deref())?;

        match &self.command {
            GrantsSubcommand::Stats { role } => {
                let evaluator = self.load_evaluator(catalog, role)?;
                print_stats(&evaluator);
            }
            GrantsSubcommand::Toggle {
                module,
                action,
                role,
            } => {
                let mut evaluator = self.load_evaluator(catalog, role)?;
                evaluator.toggle_permission(module, action);

                let state = if evaluator.has_permission(module, action) {
                    style("granted").green()
                } else {
                    style("revoked").red()
                };
                println!("{}.{} {} for role '{}'", module, action, state, role);
                self.persist(&evaluator)?;
            }
            GrantsSubcommand::Module {
                module,
                role,
                revoke,
            } => {
                let mut evaluator = self.load_evaluator(catalog, role)?;
                evaluator.toggle_module(module, !revoke);

                let verb = if *revoke { "revoked from" } else { "granted to" };
                println!("All actions on '{}' {} role '{}'", module, verb, role);
                self.persist(&evaluator)?;
            }
            GrantsSubcommand::Export { role } => {
                let evaluator = self.load_evaluator(catalog, role)?;
                let snapshot = evaluator.export_snapshot();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            GrantsSubcommand::Import { file, role } => {
                let mut evaluator = PermissionEvaluator::new(catalog, role);
                let foreign = read_grant_table(file)?;
                let report = evaluator.import(&foreign);
                print_report(&report);
                self.persist(&evaluator)?;
            }
            GrantsSubcommand::Find { query } => {
                let evaluator = PermissionEvaluator::new(catalog, "super");
                let matches = evaluator.filter_modules(query);
                if matches.is_empty() {
                    println!("No modules match '{}'", query);
                }
                for module in matches {
                    let actions: Vec<&str> =
                        module.actions.iter().map(|a| a.id.as_str()).collect();
                    println!(
                        "{}  {} [{}]",
                        style(&module.id).cyan(),
                        module.name,
                        actions.join(", ")
                    );
                }
            }
        }
        Ok(())
    }

    fn load_evaluator(
        &self,
        catalog: PermissionCatalog,
        role: &str,
    ) -> anyhow::Result<PermissionEvaluator> {
        match &self.grants {
            Some(path) if path.exists() => {
                let seed = read_grant_table(path)?;
                let (evaluator, report) = PermissionEvaluator::with_seed(catalog, role, &seed);
                print_report(&report);
                Ok(evaluator)
            }
            _ => Ok(PermissionEvaluator::new(catalog, role)),
        }
    }

    fn persist(&self, evaluator: &PermissionEvaluator) -> anyhow::Result<()> {
        if let Some(path) = &self.grants {
            let json = serde_json::to_string_pretty(&evaluator.export())?;
            std::fs::write(path, json)?;
            println!("{} wrote {}", style("✓").green(), path.display());
        }
        Ok(())
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<PermissionCatalog> {
    let catalog = match path {
        Some(path) => PermissionCatalog::from_file(path)?,
        None => PermissionCatalog::standard(),
    };
    catalog.validate()?;
    Ok(catalog)
}

fn read_grant_table(path: &Path) -> anyhow::Result<GrantTable> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_stats(evaluator: &PermissionEvaluator) {
    for category in &evaluator.catalog().categories {
        let stats = evaluator.category_stats(&category.id);
        println!(
            "{:<12} {:>3}/{:<3} ({:.0}%)",
            category.name, stats.granted, stats.total, stats.percentage
        );
    }
    let total = evaluator.total_stats();
    println!(
        "{:<12} {:>3}/{:<3} ({:.0}%)",
        style("Total").bold(),
        total.granted,
        total.total,
        total.percentage
    );
}

fn print_report(report: &MergeReport) {
    if report.is_clean() {
        return;
    }
    for module in &report.dropped_modules {
        println!(
            "{} dropped unknown module '{}'",
            style("!").yellow(),
            module
        );
    }
    for (module, action) in &report.dropped_actions {
        println!(
            "{} dropped unknown action '{}.{}'",
            style("!").yellow(),
            module,
            action
        );
    }
}
