use std::io::{self, Write};

use anyhow::{Result, bail};
use colored::Colorize;

use super::context::CommandContext;
use crate::{
    cli::{args::MapCommand, exit_status::ExitStatus},
    core::{TokenMap, TokenMapNode},
};

pub fn map(cmd: MapCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let token_map = TokenMap::build(ctx.dsdb.tokens());

    let prefix = cmd.prefix.as_deref().unwrap_or_default();
    let Some(node) = token_map.find(prefix) else {
        bail!("No tokens under prefix '{}'", prefix);
    };

    let mut stdout = io::stdout().lock();
    if prefix.is_empty() {
        write_children(node, 0, &mut stdout)?;
    } else {
        write_node(prefix, node, 0, &mut stdout)?;
    }
    Ok(ExitStatus::Success)
}

fn write_node<W: Write>(
    label: &str,
    node: &TokenMapNode<'_>,
    depth: usize,
    writer: &mut W,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match node.token {
        Some(token) => writeln!(
            writer,
            "{}{}  {}",
            indent,
            label,
            token.token_value_type.to_string().dimmed()
        )?,
        None => writeln!(
            writer,
            "{}{} {}",
            indent,
            label.bold(),
            format!("({})", node.count()).dimmed()
        )?,
    }
    write_children(node, depth + 1, writer)
}

fn write_children<W: Write>(
    node: &TokenMapNode<'_>,
    depth: usize,
    writer: &mut W,
) -> io::Result<()> {
    for (segment, child) in &node.children {
        write_node(segment, child, depth, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::tests::fixture;

    #[test]
    fn test_map_subtree() {
        colored::control::set_override(false);
        let dsdb = fixture();
        let token_map = TokenMap::build(dsdb.tokens());
        let node = token_map.find("md.sys.color").unwrap();

        let mut output = Vec::new();
        write_node("md.sys.color", node, 0, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "md.sys.color (3)\n  on-primary  COLOR\n  primary  COLOR\n  scrim  COLOR\n"
        );
    }
}
