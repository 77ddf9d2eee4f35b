//! atrium preview command

use clap::Args;
use console::style;
use std::path::PathBuf;

use menu::{MenuBuilder, MenuNode, RouteGroup};
use shared::{AbilityGrant, SessionClaims};

#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Menu tree definition file (JSON)
    pub menu: PathBuf,

    /// Role to preview as
    #[arg(short, long)]
    pub role: String,

    /// Session abilities file (JSON array of module grants)
    #[arg(short, long)]
    pub abilities: Option<PathBuf>,

    /// Admin route group file (JSON)
    #[arg(long)]
    pub admin_routes: Option<PathBuf>,
}

impl PreviewCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let mut builder = MenuBuilder::from_file(&self.menu)?;

        if let Some(path) = &self.admin_routes {
            let content = std::fs::read_to_string(path)?;
            let routes: RouteGroup = serde_json::from_str(&content)?;
            builder = builder.with_admin_routes(routes);
        }

        let abilities: Vec<AbilityGrant> = match &self.abilities {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            None => vec![],
        };

        let claims = SessionClaims::new(&self.role, abilities);
        let tree = builder.generate(&claims);

        if tree.is_empty() {
            println!("(empty menu for role '{}')", self.role);
        } else {
            print_tree(&tree, 0);
        }
        Ok(())
    }
}

fn print_tree(nodes: &[MenuNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            MenuNode::Section(section) => {
                println!("{}{}", indent, style(&section.label).bold());
                print_tree(&section.items, depth + 1);
            }
            MenuNode::Item(item) => match &item.to {
                Some(to) => println!("{}{}  {}", indent, item.label, style(to).dim()),
                None => println!("{}{}", indent, item.label),
            },
        }
    }
}
